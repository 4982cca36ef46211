use sha2::{Digest, Sha256};

use crate::output::prompt_input;

/// Single shared-secret check in front of every view.
pub struct AccessGate {
    digest: Option<[u8; 32]>,
}

impl AccessGate {
    pub fn new(secret: Option<&str>) -> Self {
        Self {
            digest: secret.map(digest),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.digest.is_some()
    }

    /// Compares digests so the attempt's length does not end the comparison
    /// early.
    pub fn verify(&self, attempt: &str) -> bool {
        match &self.digest {
            None => true,
            Some(expected) => {
                let actual = digest(attempt);
                expected
                    .iter()
                    .zip(actual.iter())
                    .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                    == 0
            }
        }
    }

    /// Passes when the gate is off; otherwise checks `provided`, prompting on
    /// stdin when no secret was given on the command line.
    pub fn authorize(&self, provided: Option<&str>) -> anyhow::Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }
        let attempt = match provided {
            Some(s) => s.to_string(),
            None => prompt_input("Access secret: ")?,
        };
        if !self.verify(&attempt) {
            tracing::warn!("access gate rejected secret");
            anyhow::bail!("access denied");
        }
        Ok(())
    }
}

fn digest(s: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    hasher.finalize().into()
}
