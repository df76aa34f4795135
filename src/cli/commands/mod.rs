//! Subcommand implementations, one module per command group.

/// `export`
pub mod export;
/// `history`
pub mod history;
/// `import`
pub mod import;
/// `lists`
pub mod lists;
/// `report`
pub mod report;
/// `stock`
pub mod stock;
/// `withdraw`
pub mod withdraw;
