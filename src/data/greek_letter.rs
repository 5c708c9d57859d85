use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RecognitionError;

/// The 24 letters of the Greek alphabet. Ordinals are 1-based and stable;
/// they double as class ids (`ordinal - 1` is the one-hot index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GreekLetter {
    Alpha = 1,
    Beta,
    Gamma,
    Delta,
    Epsilon,
    Zeta,
    Eta,
    Theta,
    Iota,
    Kappa,
    Lambda,
    Mu,
    Nu,
    Xi,
    Omicron,
    Pi,
    Rho,
    Sigma,
    Tau,
    Upsilon,
    Phi,
    Chi,
    Psi,
    Omega,
}

impl GreekLetter {
    pub const COUNT: usize = 24;

    pub const ALL: [GreekLetter; GreekLetter::COUNT] = [
        GreekLetter::Alpha,
        GreekLetter::Beta,
        GreekLetter::Gamma,
        GreekLetter::Delta,
        GreekLetter::Epsilon,
        GreekLetter::Zeta,
        GreekLetter::Eta,
        GreekLetter::Theta,
        GreekLetter::Iota,
        GreekLetter::Kappa,
        GreekLetter::Lambda,
        GreekLetter::Mu,
        GreekLetter::Nu,
        GreekLetter::Xi,
        GreekLetter::Omicron,
        GreekLetter::Pi,
        GreekLetter::Rho,
        GreekLetter::Sigma,
        GreekLetter::Tau,
        GreekLetter::Upsilon,
        GreekLetter::Phi,
        GreekLetter::Chi,
        GreekLetter::Psi,
        GreekLetter::Omega,
    ];

    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn from_ordinal(ordinal: usize) -> Option<GreekLetter> {
        ordinal
            .checked_sub(1)
            .and_then(|i| GreekLetter::ALL.get(i))
            .copied()
    }

    /// Zero-based position of this letter in a one-hot target.
    pub fn one_hot_index(self) -> usize {
        self.ordinal() - 1
    }

    pub fn name(self) -> &'static str {
        match self {
            GreekLetter::Alpha => "Alpha",
            GreekLetter::Beta => "Beta",
            GreekLetter::Gamma => "Gamma",
            GreekLetter::Delta => "Delta",
            GreekLetter::Epsilon => "Epsilon",
            GreekLetter::Zeta => "Zeta",
            GreekLetter::Eta => "Eta",
            GreekLetter::Theta => "Theta",
            GreekLetter::Iota => "Iota",
            GreekLetter::Kappa => "Kappa",
            GreekLetter::Lambda => "Lambda",
            GreekLetter::Mu => "Mu",
            GreekLetter::Nu => "Nu",
            GreekLetter::Xi => "Xi",
            GreekLetter::Omicron => "Omicron",
            GreekLetter::Pi => "Pi",
            GreekLetter::Rho => "Rho",
            GreekLetter::Sigma => "Sigma",
            GreekLetter::Tau => "Tau",
            GreekLetter::Upsilon => "Upsilon",
            GreekLetter::Phi => "Phi",
            GreekLetter::Chi => "Chi",
            GreekLetter::Psi => "Psi",
            GreekLetter::Omega => "Omega",
        }
    }
}

impl fmt::Display for GreekLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive, so dataset folder names like `alpha/` parse too.
impl FromStr for GreekLetter {
    type Err = RecognitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        GreekLetter::ALL
            .iter()
            .copied()
            .find(|l| l.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RecognitionError::UnknownLabel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_are_one_based_and_dense() {
        for (i, letter) in GreekLetter::ALL.iter().enumerate() {
            assert_eq!(letter.ordinal(), i + 1);
            assert_eq!(GreekLetter::from_ordinal(i + 1), Some(*letter));
        }
        assert_eq!(GreekLetter::Omega.ordinal(), 24);
        assert_eq!(GreekLetter::Alpha.one_hot_index(), 0);
    }

    #[test]
    fn from_ordinal_rejects_out_of_range() {
        assert_eq!(GreekLetter::from_ordinal(0), None);
        assert_eq!(GreekLetter::from_ordinal(25), None);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("lambda".parse::<GreekLetter>().unwrap(), GreekLetter::Lambda);
        assert_eq!("OMEGA".parse::<GreekLetter>().unwrap(), GreekLetter::Omega);
        assert!("digamma".parse::<GreekLetter>().is_err());
    }

    #[test]
    fn serializes_by_name() {
        let json = serde_json::to_string(&GreekLetter::Sigma).unwrap();
        assert_eq!(json, "\"Sigma\"");
    }
}
