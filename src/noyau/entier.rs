// src/noyau/entier.rs
//
// Grand entier (collaborateur du rationnel) :
// - lecture dans une base (0 = détection des préfixes 0x / 0b / 0o)
// - affichage dans la base de sortie
// - shrink : redescend en Int quand la valeur tient sur 32 bits

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use super::config::Config;
use super::erreur::{ParseError, ParseResult};
use super::valeur::Value;

/// Valeur "grand entier".
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Entier(BigInt);

impl Entier {
    pub fn new(n: BigInt) -> Self {
        Entier(n)
    }

    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    /// Int si la valeur tient sur 32 bits signés (le produit de deux Int tient alors
    /// dans un i64), sinon reste grand entier.
    pub fn shrink(self) -> Value {
        match self.0.to_i32() {
            Some(i) => Value::Int(i64::from(i)),
            None => Value::BigInt(self),
        }
    }
}

/* ------------------------ Lecture ------------------------ */

/// Renvoie (négatif?, reste sans signe)
fn split_signe(s: &str) -> (bool, &str) {
    if let Some(reste) = s.strip_prefix('-') {
        (true, reste)
    } else if let Some(reste) = s.strip_prefix('+') {
        (false, reste)
    } else {
        (false, s)
    }
}

fn prefixe(s: &str) -> Option<(u32, &str)> {
    let mut it = s.chars();
    if it.next() != Some('0') {
        return None;
    }
    let base = match it.next()? {
        'x' | 'X' => 16,
        'b' | 'B' => 2,
        'o' | 'O' => 8,
        _ => return None,
    };
    Some((base, &s[2..]))
}

/// Chiffres valides dans `base`, `_` seulement entre deux chiffres.
fn chiffres_valides(s: &str, base: u32) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }
    s.chars().all(|c| c == '_' || c.is_digit(base))
}

/// Lit un entier signé. `base` = 0 : préfixe 0x/0b/0o sinon décimal ;
/// base explicite : le préfixe correspondant (0x en 16, 0b en 2, 0o en 8) est toléré.
pub fn parse_bigint(text: &str, base: u32) -> ParseResult<BigInt> {
    let erreur = || ParseError::IntegerSyntax(text.to_string());

    let (neg, corps) = split_signe(text.trim());
    let (base, chiffres) = match (base, prefixe(corps)) {
        (0, Some((b, reste))) => (b, reste),
        (0, None) => (10, corps),
        (b, Some((pb, reste))) if pb == b => (b, reste),
        (b, _) if (2..=36).contains(&b) => (b, corps),
        _ => return Err(erreur()),
    };

    if !chiffres_valides(chiffres, base) {
        return Err(erreur());
    }
    let propre: String = chiffres.chars().filter(|c| *c != '_').collect();
    let n = BigInt::parse_bytes(propre.as_bytes(), base).ok_or_else(erreur)?;

    Ok(if neg { -n } else { n })
}

/* ------------------------ Affichage ------------------------ */

/// Base d'affichage effective (0 = décimal).
pub fn base_sortie(config: &Config) -> u32 {
    match config.output_base() {
        0 => 10,
        b => b,
    }
}

/// Entier dans la base de sortie, signe '-' en tête.
pub fn format_bigint(n: &BigInt, config: &Config) -> String {
    n.to_str_radix(base_sortie(config))
}
