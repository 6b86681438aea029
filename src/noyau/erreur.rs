// src/noyau/erreur.rs
//
// Erreurs du noyau rationnel.
// - ParseError      : lecture (récupérable, l'appelant peut afficher et continuer)
// - FormatError     : config de sortie invalide (la requête échoue, pas le process)
// - ConfigError     : validation de la config
// - NarrowingError  : contrat appelant violé (to_type le transforme en panic)

use thiserror::Error;

use super::valeur::ValueKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("rational number syntax")]
    RationalSyntax,
    #[error("integer number syntax: {0:?}")]
    IntegerSyntax(String),
    #[error("zero denominator in rational")]
    ZeroDenominator,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("can't handle verb {0} for rational")]
    UnsupportedVerb(char),
    #[error("bad verb %{0} in integer template")]
    TemplateVerb(char),
    #[error("template consumes more values than provided")]
    TemplateArity,
    #[error("float precision {0} out of range")]
    Precision(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid base {0} (expected 0 or 2..=36)")]
    InvalidBase(u32),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NarrowingError {
    #[error("invalid narrowing: {from:?} to {to:?}")]
    InvalidNarrowing { from: ValueKind, to: ValueKind },
}

pub type ParseResult<T> = Result<T, ParseError>;
pub type FormatResult<T> = Result<T, FormatError>;
