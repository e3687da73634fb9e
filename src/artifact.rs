//! Hardhat compilation artifacts.
//!
//! The contracts are compiled outside this repository; deployments against a
//! remote network read the creation bytecode from
//! `artifacts/contracts/<Name>.sol/<Name>.json`.

use std::path::{Path, PathBuf};

use alloy::primitives::Bytes;
use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// The subset of a Hardhat artifact this crate needs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardhatArtifact {
    pub contract_name: String,
    pub source_name: String,
    pub abi: serde_json::Value,
    pub bytecode: String,
}

impl HardhatArtifact {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read artifact {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse artifact {}", path.display()))
    }

    /// Creation bytecode, without constructor arguments.
    pub fn creation_code(&self) -> Result<Bytes> {
        let code = self.bytecode.trim();
        if code.is_empty() || code == "0x" {
            bail!(
                "artifact for {} has no bytecode (abstract contract or interface?)",
                self.contract_name
            );
        }
        if code.contains("__$") {
            bail!(
                "artifact for {} has unlinked library references",
                self.contract_name
            );
        }
        code.parse::<Bytes>()
            .with_context(|| format!("invalid bytecode hex in artifact for {}", self.contract_name))
    }

    /// Fully qualified name as explorers expect it, e.g.
    /// `contracts/MyERC20Token.sol:MyERC20Token`.
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }
}

/// Resolves artifacts by contract name under a Hardhat `artifacts/` root.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, contract: &str) -> PathBuf {
        self.root
            .join("contracts")
            .join(format!("{contract}.sol"))
            .join(format!("{contract}.json"))
    }

    pub fn load(&self, contract: &str) -> Result<HardhatArtifact> {
        let artifact = HardhatArtifact::load(&self.path_for(contract))?;
        if artifact.contract_name != contract {
            bail!(
                "artifact at {} describes {}, expected {}",
                self.path_for(contract).display(),
                artifact.contract_name,
                contract
            );
        }
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_artifact(root: &Path, name: &str, bytecode: &str) {
        let dir = root.join("contracts").join(format!("{name}.sol"));
        std::fs::create_dir_all(&dir).unwrap();
        let body = serde_json::json!({
            "_format": "hh-sol-artifact-1",
            "contractName": name,
            "sourceName": format!("contracts/{name}.sol"),
            "abi": [],
            "bytecode": bytecode,
            "deployedBytecode": "0x",
            "linkReferences": {},
            "deployedLinkReferences": {}
        });
        std::fs::write(dir.join(format!("{name}.json")), body.to_string()).unwrap();
    }

    #[test]
    fn test_load_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        write_artifact(tmp.path(), "MyERC20Token", "0x6080604052");

        let store = ArtifactStore::new(tmp.path());
        let artifact = store.load("MyERC20Token").unwrap();

        assert_eq!(artifact.contract_name, "MyERC20Token");
        assert_eq!(
            artifact.qualified_name(),
            "contracts/MyERC20Token.sol:MyERC20Token"
        );
        assert_eq!(
            artifact.creation_code().unwrap(),
            Bytes::from(vec![0x60, 0x80, 0x60, 0x40, 0x52])
        );
    }

    #[test]
    fn test_missing_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(tmp.path());
        assert!(store.load("MyERC721Token").is_err());
    }

    #[test]
    fn test_empty_and_unlinked_bytecode() {
        let tmp = tempfile::tempdir().unwrap();
        write_artifact(tmp.path(), "IToken", "0x");
        write_artifact(
            tmp.path(),
            "Linked",
            "0x6080__$0123456789abcdef0123456789abcdef01$__6040",
        );

        let store = ArtifactStore::new(tmp.path());
        assert!(store.load("IToken").unwrap().creation_code().is_err());
        assert!(store.load("Linked").unwrap().creation_code().is_err());
    }
}
