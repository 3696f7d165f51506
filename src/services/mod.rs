pub mod multisig_watcher;

pub use multisig_watcher::{MultiSigWatcher, WatcherSnapshot};
