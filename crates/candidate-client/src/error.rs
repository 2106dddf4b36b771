use std::path::PathBuf;

use thiserror::Error;

/// Client-level errors, one kind per pipeline stage. All of these abort the
/// remaining steps; per-account decode failures never reach this type (they
/// are logged and skipped in the reader).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("funding error: {0}")]
    Funding(String),

    // The three deployment failures carry distinct remediation hints.
    #[error("program keypair not found at {}: build and deploy the program, then point --program-keypair at its keypair file", path.display())]
    ProgramKeypairMissing { path: PathBuf },

    #[error("program {address} has not been deployed to this cluster: run `solana program deploy` first")]
    ProgramNotDeployed { address: String },

    #[error("program {address} exists but is not executable: redeploy it")]
    ProgramNotExecutable { address: String },

    #[error("account creation failed: {0}")]
    Creation(String),

    #[error("record write failed: {0}")]
    Write(String),

    #[error("history reconciliation failed: {0}")]
    Reconciliation(String),

    #[error("rpc error: {0}")]
    Rpc(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployment_causes_are_distinguishable() {
        let missing = ClientError::ProgramKeypairMissing {
            path: PathBuf::from("/tmp/program-keypair.json"),
        };
        let undeployed = ClientError::ProgramNotDeployed {
            address: "Prog111".into(),
        };
        let not_executable = ClientError::ProgramNotExecutable {
            address: "Prog111".into(),
        };

        assert!(missing.to_string().contains("--program-keypair"));
        assert!(undeployed.to_string().contains("solana program deploy"));
        assert!(not_executable.to_string().contains("redeploy"));
    }

    #[test]
    fn display_funding_error() {
        let err = ClientError::Funding("airdrop rejected".into());
        assert_eq!(err.to_string(), "funding error: airdrop rejected");
    }

    #[test]
    fn display_write_error() {
        let err = ClientError::Write("broadcast failed".into());
        assert_eq!(err.to_string(), "record write failed: broadcast failed");
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> =
            Box::new(ClientError::Configuration("no endpoint".into()));
        assert!(err.to_string().contains("no endpoint"));
    }
}
