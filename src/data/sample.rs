use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::greek_letter::GreekLetter;
use crate::error::{PersistenceError, RecognitionError, Result};

/// A labelled pixel vector. The length is not checked here; the network
/// rejects or skips vectors that do not match its input layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub pixels: Vec<f64>,
    pub label: GreekLetter,
}

impl Sample {
    pub fn new(pixels: Vec<f64>, label: GreekLetter) -> Sample {
        Sample { pixels, label }
    }
}

/// Reads a dataset exported as a JSON array of `{"pixels": [...], "label": "Alpha"}`.
pub fn load_samples_json<P: AsRef<Path>>(path: P) -> Result<Vec<Sample>> {
    let path = path.as_ref();
    let wrap = |source: PersistenceError| RecognitionError::DatasetLoading {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(|e| wrap(e.into()))?;
    let samples: Vec<Sample> =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| wrap(e.into()))?;
    log::debug!("loaded {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_labelled_samples() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"pixels": [1.0, 0.0], "label": "Alpha"}}, {{"pixels": [0.0, 1.0], "label": "Omega"}}]"#
        )
        .unwrap();

        let samples = load_samples_json(file.path()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1], Sample::new(vec![0.0, 1.0], GreekLetter::Omega));
    }

    #[test]
    fn unknown_label_fails_to_parse() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"pixels": [1.0], "label": "Digamma"}}]"#).unwrap();

        assert!(matches!(
            load_samples_json(file.path()),
            Err(RecognitionError::DatasetLoading { source: PersistenceError::Json(_), .. })
        ));
    }
}
