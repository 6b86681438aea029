// src/noyau/format.rs
//
// Affichage d'un BigRat selon la config :
// 1) aucun gabarit      -> "num/den" (chaque entier via l'affichage entier : base de sortie, signe)
// 2) verbe flottant     -> float_string (f/F : virgule fixe, e/E : scientifique exacte)
// 3) sinon              -> gabarit rationnel à deux emplacements (num puis den)
//
// Jamais de flottants : tout passe par des divisions entières exactes.
// Arrondi : au plus proche, moitié loin de zéro (voir DESIGN.md).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use tracing::error;

use super::config::{Config, PRECISION_MAX};
use super::entier::format_bigint;
use super::erreur::{FormatError, FormatResult};
use super::exposant::{pow10, rat_exponent, rat_scale};
use super::gabarit;
use super::rationnel::BigRat;

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Arrondi {
    /// au plus proche, moitié loin de zéro
    Proche,
    /// troncature exacte (chiffre de garde pour la notation scientifique)
    Tronque,
}

/// Entier "scalé" (×10^digits, >= 0) -> texte décimal.
fn scaled_to_decimal(scaled: &BigInt, digits: usize, neg: bool) -> String {
    let signe = if neg { "-" } else { "" };
    if digits == 0 {
        return format!("{signe}{scaled}");
    }

    let scale = pow10(digits);
    let int_part = scaled / &scale;
    let frac_part = scaled % &scale;

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }
    format!("{signe}{int_part}.{frac}")
}

/// Développement décimal exact de r avec `digits` chiffres après la virgule.
/// Le signe suit la valeur (-1/1000 à 2 chiffres donne "-0.00").
fn fixed_string(r: &BigRational, digits: usize, mode: Arrondi) -> String {
    let num = r.numer().abs() * pow10(digits);
    let den = r.denom();

    let mut q = &num / den;
    if mode == Arrondi::Proche {
        let reste = &num % den;
        if reste * 2u32 >= *den {
            q += 1u32;
        }
    }
    scaled_to_decimal(&q, digits, r.is_negative())
}

/* ------------------------ Notation scientifique ------------------------ */

/// Assemble signe + chiffres + exposant : "d.ddde+NN".
///
/// `chiffres` porte le chiffre de tête, `prec` chiffres de mantisse et un chiffre de garde ;
/// on arrondit sur la garde (moitié loin de zéro). Une retenue qui déborde (9.99 -> 10.0)
/// donne 1.00 et incrémente l'exposant. Exposant sur au moins deux chiffres.
fn e_format(verb: char, prec: usize, sign: &str, chiffres: &str, exp: i64) -> String {
    let mut ds: Vec<u8> = chiffres
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as u8)
        .collect();
    if ds.len() < prec + 2 {
        ds.resize(prec + 2, 0);
    }

    let garde = ds[prec + 1];
    ds.truncate(prec + 1);

    let mut exp = exp;
    if garde >= 5 {
        let mut i = ds.len();
        loop {
            if i == 0 {
                // que des 9 : 9.99 -> 10.0 -> 1.00e(exp+1)
                ds.insert(0, 1);
                ds.truncate(prec + 1);
                exp += 1;
                break;
            }
            i -= 1;
            if ds[i] == 9 {
                ds[i] = 0;
            } else {
                ds[i] += 1;
                break;
            }
        }
    }

    let mut out = String::from(sign);
    out.push(char::from(b'0' + ds[0]));
    if prec > 0 {
        out.push('.');
        out.extend(ds[1..].iter().map(|d| char::from(b'0' + d)));
    }

    let marque = if verb == 'E' { 'E' } else { 'e' };
    let signe_exp = if exp < 0 { '-' } else { '+' };
    out.push_str(&format!("{marque}{signe_exp}{:02}", exp.unsigned_abs()));
    out
}

fn scientifique(r: &BigRat, verb: char, prec: usize) -> String {
    let sign = if r.is_negative() { "-" } else { "" };
    let x = r.as_ratio().abs();
    if x.is_zero() {
        return e_format(verb, prec, sign, "0", 0);
    }

    let mut exp = rat_exponent(&x);
    // copie privée : la valeur stockée n'est jamais touchée
    let mut t = x;
    rat_scale(&mut t, exp);

    // +1 : chiffre de garde pour l'arrondi de e_format
    let rendu = fixed_string(&t, prec + 1, Arrondi::Tronque);
    let chiffres = if rendu.starts_with('0') {
        exp -= 1;
        rendu[2..].to_string()
    } else {
        format!("{}{}", &rendu[..1], &rendu[2..])
    };

    e_format(verb, prec, sign, &chiffres, exp)
}

/// Rendu flottant d'un rationnel. Verbes acceptés : f F e E.
pub fn float_string(r: &BigRat, verb: char, prec: usize) -> FormatResult<String> {
    if prec > PRECISION_MAX {
        error!(prec, "précision flottante hors limite");
        return Err(FormatError::Precision(prec));
    }
    match verb {
        'f' | 'F' => Ok(fixed_string(r.as_ratio(), prec, Arrondi::Proche)),
        'e' | 'E' => Ok(scientifique(r, verb, prec)),
        _ => {
            error!(%verb, "verbe flottant non supporté pour un rationnel");
            Err(FormatError::UnsupportedVerb(verb))
        }
    }
}

/* ------------------------ Affichage selon la config ------------------------ */

pub fn format_rat(r: &BigRat, config: &Config) -> FormatResult<String> {
    if config.output_template().is_none() {
        return Ok(format!(
            "{}/{}",
            format_bigint(r.numer(), config),
            format_bigint(r.denom(), config)
        ));
    }
    if let Some((verb, prec)) = config.float_format() {
        return float_string(r, verb, prec);
    }
    gabarit::apply(config.rat_format(), &[r.numer(), r.denom()], config)
}
