//! Runtime state persisted as a bincode snapshot between invocations.

use std::path::Path;

use anyhow::Context;
use splitz_runtime::RuntimeState;
use splitz_types::AccountId;

/// Load the saved state, or start fresh for `deployer` if there is none yet.
pub fn load(path: &Path, deployer: &AccountId) -> anyhow::Result<RuntimeState> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no state file, starting fresh");
        return Ok(RuntimeState::new(deployer.clone()));
    }
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read state file {}", path.display()))?;
    let state: RuntimeState = bincode::deserialize(&bytes)
        .with_context(|| format!("corrupt state file {}", path.display()))?;
    if state.factory().deployer() != deployer {
        tracing::warn!(
            saved = %state.factory().deployer(),
            configured = %deployer,
            "state file was created by a different deployer; keeping the saved one"
        );
    }
    Ok(state)
}

/// Write `state` to `path`, replacing the previous snapshot atomically.
pub fn save(path: &Path, state: &RuntimeState) -> anyhow::Result<()> {
    let bytes = bincode::serialize(state).context("failed to encode state")?;
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, bytes)
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("failed to replace state file {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitz_runtime::Runtime;
    use splitz_types::AssetId;

    #[test]
    fn test_missing_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let state = load(&dir.path().join("state.bin"), &AccountId::new("d")).unwrap();
        assert!(state.factory().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.bin");
        let deployer = AccountId::new("d");

        let mut rt = Runtime::new(deployer.clone());
        let alice = AccountId::new("alice");
        rt.mint(&alice, &AssetId::Native, 42).unwrap();
        let id = rt.create_instance(vec![alice.clone()], vec![1]).unwrap();
        save(&path, rt.state()).unwrap();

        let rt = Runtime::from_state(load(&path, &deployer).unwrap());
        assert_eq!(rt.balance_of(&alice, &AssetId::Native), 42);
        assert_eq!(rt.instances(), &[id]);
        assert_eq!(rt.events().len(), 2);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.bin");
        std::fs::write(&path, b"\xff\xff\xff").unwrap();
        assert!(load(&path, &AccountId::new("d")).is_err());
    }
}
