// src/noyau/gabarit.rs
//
// Petit moteur de gabarit façon printf, pour des entiers seulement.
// - "%%" : '%' littéral
// - "%[drapeaux][largeur][.précision]verbe", drapeaux parmi "-+ 0#"
// - verbes : v s (base de sortie), d (décimal), x X (hexa), o O (octal), b (binaire)
// Chaque verbe consomme un argument, dans l'ordre.
// Arguments en trop : ajoutés en "%!(EXTRA ...)".

use num_bigint::BigInt;
use num_traits::Signed;

use super::config::Config;
use super::entier::{base_sortie, format_bigint};
use super::erreur::{FormatError, FormatResult};

#[derive(Clone, Debug, Default)]
struct Directive {
    gauche: bool,
    plus: bool,
    espace: bool,
    zero: bool,
    diese: bool,
    largeur: Option<usize>,
    precision: Option<usize>,
}

fn lit_nombre(chars: &[char], i: &mut usize) -> Option<usize> {
    let debut = *i;
    while *i < chars.len() && chars[*i].is_ascii_digit() {
        *i += 1;
    }
    if *i == debut {
        return None;
    }
    chars[debut..*i].iter().collect::<String>().parse().ok()
}

/// Applique `gabarit` aux entiers `args`.
pub fn apply(gabarit: &str, args: &[&BigInt], config: &Config) -> FormatResult<String> {
    let chars: Vec<char> = gabarit.chars().collect();
    let mut out = String::new();
    let mut i: usize = 0;
    let mut suivant: usize = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        if c != '%' {
            out.push(c);
            continue;
        }
        if i < chars.len() && chars[i] == '%' {
            out.push('%');
            i += 1;
            continue;
        }

        let mut dir = Directive::default();
        while i < chars.len() {
            match chars[i] {
                '-' => dir.gauche = true,
                '+' => dir.plus = true,
                ' ' => dir.espace = true,
                '0' => dir.zero = true,
                '#' => dir.diese = true,
                _ => break,
            }
            i += 1;
        }
        dir.largeur = lit_nombre(&chars, &mut i);
        if i < chars.len() && chars[i] == '.' {
            i += 1;
            dir.precision = Some(lit_nombre(&chars, &mut i).unwrap_or(0));
        }

        // '%' en fin de gabarit : pas de verbe
        let verbe = *chars.get(i).ok_or(FormatError::TemplateVerb('%'))?;
        i += 1;

        let n = args.get(suivant).ok_or(FormatError::TemplateArity)?;
        suivant += 1;
        out.push_str(&formate_entier(n, verbe, &dir, config)?);
    }

    if suivant < args.len() {
        let extra: Vec<String> = args[suivant..]
            .iter()
            .map(|n| format_bigint(n, config))
            .collect();
        out.push_str(&format!("%!(EXTRA {})", extra.join(", ")));
    }
    Ok(out)
}

fn formate_entier(n: &BigInt, verbe: char, dir: &Directive, config: &Config) -> FormatResult<String> {
    let (base, prefixe) = match verbe {
        'v' | 's' => (base_sortie(config), ""),
        'd' => (10, ""),
        'x' => (16, "0x"),
        'X' => (16, "0X"),
        'o' => (8, "0"),
        'O' => (8, "0o"),
        'b' => (2, "0b"),
        autre => return Err(FormatError::TemplateVerb(autre)),
    };

    let mut chiffres = n.magnitude().to_str_radix(base);
    if verbe == 'X' {
        chiffres = chiffres.to_uppercase();
    }
    if let Some(p) = dir.precision {
        while chiffres.len() < p {
            chiffres.insert(0, '0');
        }
    }

    let signe = if n.is_negative() {
        "-"
    } else if dir.plus {
        "+"
    } else if dir.espace {
        " "
    } else {
        ""
    };
    // %O : toujours préfixé
    let prefixe = if dir.diese || verbe == 'O' { prefixe } else { "" };

    let longueur = signe.len() + prefixe.len() + chiffres.len();
    let largeur = dir.largeur.unwrap_or(0);
    if longueur >= largeur {
        return Ok(format!("{signe}{prefixe}{chiffres}"));
    }

    let pad = largeur - longueur;
    Ok(if dir.gauche {
        format!("{signe}{prefixe}{chiffres}{}", " ".repeat(pad))
    } else if dir.zero && dir.precision.is_none() {
        format!("{signe}{prefixe}{}{chiffres}", "0".repeat(pad))
    } else {
        format!("{}{signe}{prefixe}{chiffres}", " ".repeat(pad))
    })
}
