// src/noyau/lecture.rs
//
// Lecture texte -> BigRat, selon la base d'entrée de la config.
//
// - base 0 / 10 : grammaire rationnelle native (a/b, décimaux, exposants, préfixes 0x/0b/0o)
// - autre base, sans '/' : entier dans cette base (rationnel n/1)
// - autre base, avec '/' : on coupe au premier '/', chaque côté est un entier dans la base
//   (la grammaire native ne connaît que le décimal)

use num_bigint::BigInt;
use num_traits::Zero;
use tracing::debug;

use super::config::Config;
use super::entier::parse_bigint;
use super::erreur::{ParseError, ParseResult};
use super::exposant::pow10;
use super::rationnel::BigRat;

/// Au-delà, "1e…" demanderait une puissance de dix démesurée.
const EXPOSANT_MAX: u32 = 100_000;

pub fn parse_rat(text: &str, config: &Config) -> ParseResult<BigRat> {
    let s = text.trim();
    if s.is_empty() {
        return Err(ParseError::Empty);
    }

    let base = config.input_base();
    match (s.find('/'), base) {
        (_, 0 | 10) => {
            debug!(text = s, "lecture rationnelle native");
            litteral_natif(s)
        }
        (None, b) => {
            debug!(text = s, base = b, "lecture entière en base");
            Ok(BigRat::from_integer(parse_bigint(s, b)?))
        }
        (Some(pos), b) => {
            debug!(text = s, base = b, "lecture num/den en base");
            let num = parse_bigint(&s[..pos], b)?;
            let den = parse_bigint(&s[pos + 1..], b)?;
            BigRat::new(num, den)
        }
    }
}

/* ------------------------ Grammaire native ------------------------ */

fn split_signe(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

fn commence_par_signe(s: &str) -> bool {
    s.starts_with('-') || s.starts_with('+')
}

fn a_prefixe(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 2 && b[0] == b'0' && matches!(b[1], b'x' | b'X' | b'b' | b'B' | b'o' | b'O')
}

fn tous_chiffres(s: &str) -> bool {
    s.bytes().all(|c| c.is_ascii_digit())
}

/// Entier non signé "natif" : décimal ou préfixé.
fn entier_non_signe(s: &str) -> Option<BigInt> {
    if s.is_empty() || commence_par_signe(s) || s.trim() != s {
        return None;
    }
    parse_bigint(s, 0).ok()
}

/// Décimal exact : "12", "1.25", ".5", "3.", "1e3", "2.5E-2" -> (num, den), non signé.
fn decimal_non_signe(s: &str) -> Option<(BigInt, BigInt)> {
    if a_prefixe(s) {
        return entier_non_signe(s).map(|n| (n, BigInt::from(1)));
    }

    let (mantisse, exposant) = match s.find(|c: char| c == 'e' || c == 'E') {
        Some(p) => (&s[..p], Some(&s[p + 1..])),
        None => (s, None),
    };
    let (ent, frac) = mantisse.split_once('.').unwrap_or((mantisse, ""));
    if ent.is_empty() && frac.is_empty() {
        return None;
    }
    if !tous_chiffres(ent) || !tous_chiffres(frac) {
        return None;
    }

    let mut exp: i64 = match exposant {
        None => 0,
        Some(e) => {
            let (neg, chiffres) = split_signe(e);
            if chiffres.is_empty() || !tous_chiffres(chiffres) {
                return None;
            }
            let v = chiffres.parse::<u32>().ok().filter(|v| *v <= EXPOSANT_MAX)?;
            if neg {
                -i64::from(v)
            } else {
                i64::from(v)
            }
        }
    };

    let tout = format!("{ent}{frac}");
    let mut num = if tout.is_empty() {
        BigInt::zero()
    } else {
        BigInt::parse_bytes(tout.as_bytes(), 10)?
    };
    exp -= frac.len() as i64;

    let mut den = BigInt::from(1);
    let grandeur = usize::try_from(exp.unsigned_abs()).ok()?;
    if exp >= 0 {
        num *= pow10(grandeur);
    } else {
        den = pow10(grandeur);
    }
    Some((num, den))
}

fn litteral_natif(s: &str) -> ParseResult<BigRat> {
    let (neg, corps) = split_signe(s);

    let (num, den) = match corps.split_once('/') {
        Some((n, d)) => {
            let num = entier_non_signe(n).ok_or(ParseError::RationalSyntax)?;
            let den = entier_non_signe(d).ok_or(ParseError::RationalSyntax)?;
            (num, den)
        }
        None => decimal_non_signe(corps).ok_or(ParseError::RationalSyntax)?,
    };

    let num = if neg { -num } else { num };
    BigRat::new(num, den)
}
