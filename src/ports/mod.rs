/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound (driven) ports describe what the application core needs
/// from infrastructure: manifests, seeds, storage, output and progress.
pub mod outbound;
