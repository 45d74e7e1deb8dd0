use crate::core::lattice::LatticeVector;
use crate::core::models::chain::{ChainConfig, Chains};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid origami input: {0}")]
    Invalid(String),
}

/// One `[[chains]]` entry. Empty position and orientation arrays leave the chain unassigned.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputChain {
    pub index: usize,
    pub identity: usize,
    #[serde(default)]
    pub positions: Vec<LatticeVector>,
    #[serde(default)]
    pub orientations: Vec<LatticeVector>,
}

/// Description of an origami system: per chain identity, the identities and sequences of
/// its domains, plus the chains present and where they sit.
///
/// ```toml
/// identities = [[1, 2], [-2, -1]]
/// sequences = [["TCCTCATA", "GGTTGTAA"], ["TTACAACC", "TATGAGGA"]]
///
/// [[chains]]
/// index = 0
/// identity = 0
/// positions = [[0, 0, 0], [1, 0, 0]]
/// orientations = [[0, 1, 0], [0, -1, 0]]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrigamiInput {
    pub identities: Vec<Vec<i32>>,
    pub sequences: Vec<Vec<String>>,
    #[serde(default)]
    pub chains: Vec<InputChain>,
}

impl OrigamiInput {
    pub fn load(path: &Path) -> Result<Self, InputLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| InputLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let input: Self = toml::from_str(&content).map_err(|e| InputLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        input.validate()?;
        Ok(input)
    }

    fn validate(&self) -> Result<(), InputLoadError> {
        if self.identities.len() != self.sequences.len() {
            return Err(InputLoadError::Invalid(format!(
                "{} identity lists but {} sequence lists",
                self.identities.len(),
                self.sequences.len()
            )));
        }
        for (chain_identity, (idents, seqs)) in
            self.identities.iter().zip(&self.sequences).enumerate()
        {
            if idents.len() != seqs.len() {
                return Err(InputLoadError::Invalid(format!(
                    "chain identity {chain_identity} has {} domain identities but {} sequences",
                    idents.len(),
                    seqs.len()
                )));
            }
        }
        for chain in &self.chains {
            let Some(idents) = self.identities.get(chain.identity) else {
                return Err(InputLoadError::Invalid(format!(
                    "chain {} has unknown identity {}",
                    chain.index, chain.identity
                )));
            };
            if chain.positions.len() != chain.orientations.len() {
                return Err(InputLoadError::Invalid(format!(
                    "chain {} has {} positions but {} orientations",
                    chain.index,
                    chain.positions.len(),
                    chain.orientations.len()
                )));
            }
            if !chain.positions.is_empty() && chain.positions.len() != idents.len() {
                return Err(InputLoadError::Invalid(format!(
                    "chain {} has {} positions for {} domains",
                    chain.index,
                    chain.positions.len(),
                    idents.len()
                )));
            }
        }
        Ok(())
    }

    /// Converts the listed chains into a configuration snapshot.
    pub fn chains(&self) -> Chains {
        self.chains
            .iter()
            .map(|chain| {
                let num_domains = self.identities.get(chain.identity).map_or(0, Vec::len);
                if chain.positions.is_empty() {
                    ChainConfig::unassigned(chain.index, chain.identity, num_domains)
                } else {
                    ChainConfig {
                        index: chain.index,
                        identity: chain.identity,
                        positions: chain.positions.iter().copied().map(Some).collect(),
                        orientations: chain.orientations.iter().copied().map(Some).collect(),
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const VALID_INPUT: &str = r#"
identities = [[1, 2], [-2, -1]]
sequences = [["TCCTCATA", "GGTTGTAA"], ["TTACAACC", "TATGAGGA"]]

[[chains]]
index = 0
identity = 0
positions = [[0, 0, 0], [1, 0, 0]]
orientations = [[0, 1, 0], [0, -1, 0]]

[[chains]]
index = 1
identity = 1
"#;

    fn write_input(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("system.toml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn load_succeeds_with_valid_toml() {
        let (_dir, path) = write_input(VALID_INPUT);
        let input = OrigamiInput::load(&path).unwrap();
        assert_eq!(input.identities, vec![vec![1, 2], vec![-2, -1]]);
        assert_eq!(input.chains.len(), 2);
        assert_eq!(input.chains[0].positions[1], LatticeVector::new(1, 0, 0));
    }

    #[test]
    fn chains_maps_empty_arrays_to_unassigned_domains() {
        let (_dir, path) = write_input(VALID_INPUT);
        let chains = OrigamiInput::load(&path).unwrap().chains();
        assert_eq!(
            chains[0].orientations,
            vec![Some(LatticeVector::yhat()), Some(-LatticeVector::yhat())]
        );
        assert_eq!(chains[1], ChainConfig::unassigned(1, 1, 2));
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = OrigamiInput::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(InputLoadError::Io { .. })));
    }

    #[test]
    fn load_fails_for_malformed_toml() {
        let (_dir, path) = write_input("this is not toml");
        let result = OrigamiInput::load(&path);
        assert!(matches!(result, Err(InputLoadError::Toml { .. })));
    }

    #[test]
    fn load_rejects_mismatched_identity_and_sequence_lists() {
        let (_dir, path) = write_input(
            r#"
identities = [[1, 2]]
sequences = [["TCCTCATA"]]
"#,
        );
        let result = OrigamiInput::load(&path);
        assert!(matches!(result, Err(InputLoadError::Invalid(_))));
    }

    #[test]
    fn load_rejects_partial_position_lists() {
        let (_dir, path) = write_input(
            r#"
identities = [[1, 2]]
sequences = [["TCCTCATA", "GGTTGTAA"]]

[[chains]]
index = 0
identity = 0
positions = [[0, 0, 0]]
orientations = [[0, 1, 0]]
"#,
        );
        let result = OrigamiInput::load(&path);
        assert!(matches!(result, Err(InputLoadError::Invalid(_))));
    }

    #[test]
    fn load_rejects_chains_of_unknown_identity() {
        let (_dir, path) = write_input(
            r#"
identities = [[1]]
sequences = [["TCCTCATA"]]

[[chains]]
index = 4
identity = 3
"#,
        );
        let result = OrigamiInput::load(&path);
        assert!(matches!(result, Err(InputLoadError::Invalid(_))));
    }
}
