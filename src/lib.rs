// src/lib.rs
//
// Rationnel Q-pur — valeur rationnelle exacte d'un évaluateur numérique.
// Lecture dans n'importe quelle base, affichage en fraction, virgule fixe,
// notation scientifique ou gabarit, sans jamais passer par les flottants.

pub mod noyau;

pub use noyau::{
    float_string, format_rat, parse_rat, BigRat, Config, ConfigError, Context, FormatError,
    Matrix, NarrowingError, ParseError, Value, ValueKind, Vector,
};
