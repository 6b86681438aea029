//! Noyau rationnel exact
//!
//! Organisation interne :
//! - rationnel.rs : BigRat (num/den canonique) + shrink / to_type / eval
//! - lecture.rs   : texte -> BigRat selon la base d'entrée
//! - exposant.rs  : exposant décimal exact + mise à l'échelle par 10^9 / 10
//! - format.rs    : fraction, virgule fixe, scientifique, gabarit
//! - gabarit.rs   : gabarit printf à emplacements entiers
//! - entier.rs    : grand entier (lecture/affichage en base, shrink)
//! - valeur.rs    : union des valeurs (Int, BigInt, BigRat, Vector, Matrix)
//! - config.rs    : config explicite (bases, gabarit de sortie)
//! - erreur.rs    : erreurs typées

pub mod config;
pub mod entier;
pub mod erreur;
pub mod exposant;
pub mod format;
pub mod gabarit;
pub mod lecture;
pub mod rationnel;
pub mod valeur;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use config::Config;
pub use erreur::{ConfigError, FormatError, NarrowingError, ParseError};
pub use format::{float_string, format_rat};
pub use lecture::parse_rat;
pub use rationnel::BigRat;
pub use valeur::{Context, Matrix, Value, ValueKind, Vector};
