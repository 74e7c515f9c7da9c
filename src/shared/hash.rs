use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Series identity of a tsuid (metric and tag uids, no salt or timestamp).
///
/// FxHasher is stable across processes, so hashes from separate scans of
/// the same series agree.
pub fn stable_hash64(tsuid: &[u8]) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(tsuid);
    hasher.finish()
}
