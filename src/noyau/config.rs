// src/noyau/config.rs
//
// Config de lecture/affichage, passée explicitement à chaque appel.
// - input_base  : 0 = défaut (préfixes 0x/0b/0o, grammaire rationnelle native), sinon 2..=36
// - output_base : 0 ou 10 = décimal, sinon 2..=36
// - format      : gabarit de sortie ("" = aucun) ; on en dérive verbe flottant + précision
//                 et le gabarit rationnel à deux emplacements.
//
// Aucun état global : la config est lue, jamais modifiée par le noyau.

use serde::{Deserialize, Serialize};

use super::erreur::ConfigError;

/// Précision par défaut quand le gabarit nomme un verbe flottant sans `.N`.
pub const PRECISION_DEFAUT: usize = 6;

/// Au-delà, le rendu flottant est refusé (FormatError::Precision).
pub const PRECISION_MAX: usize = 100_000;

/// Gabarit rationnel quand aucun format n'est configuré.
const GABARIT_RAT_DEFAUT: &str = "%v/%v";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ConfigFichier", into = "ConfigFichier")]
pub struct Config {
    input_base: u32,
    output_base: u32,
    format: String,

    // dérivés de `format`
    float_verb: Option<char>,
    float_prec: usize,
    rat_format: String,
}

/// Forme sérialisée : seulement les champs réglables.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFichier {
    pub input_base: u32,
    pub output_base: u32,
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_base: 0,
            output_base: 0,
            format: String::new(),
            float_verb: None,
            float_prec: PRECISION_DEFAUT,
            rat_format: GABARIT_RAT_DEFAUT.to_string(),
        }
    }
}

fn check_base(base: u32) -> Result<u32, ConfigError> {
    match base {
        0 | 2..=36 => Ok(base),
        _ => Err(ConfigError::InvalidBase(base)),
    }
}

impl Config {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_input_base(mut self, base: u32) -> Result<Self, ConfigError> {
        self.input_base = check_base(base)?;
        Ok(self)
    }

    pub fn with_output_base(mut self, base: u32) -> Result<Self, ConfigError> {
        self.output_base = check_base(base)?;
        Ok(self)
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.set_format(format);
        self
    }

    /// Fixe le gabarit de sortie et recalcule verbe/précision/gabarit rationnel.
    pub fn set_format(&mut self, format: &str) {
        self.format = format.to_string();
        self.float_verb = None;
        self.float_prec = PRECISION_DEFAUT;

        if format.is_empty() {
            self.rat_format = GABARIT_RAT_DEFAUT.to_string();
            return;
        }
        self.rat_format = format!("{format}/{format}");

        let verb = match format.chars().last() {
            Some(c @ ('f' | 'F' | 'e' | 'E' | 'g' | 'G')) => c,
            _ => return,
        };
        self.float_verb = Some(verb);
        if let Some(prec) = precision_du_gabarit(format) {
            self.float_prec = prec;
        }
    }

    pub fn input_base(&self) -> u32 {
        self.input_base
    }

    pub fn output_base(&self) -> u32 {
        self.output_base
    }

    /// Gabarit de sortie, `None` si aucun.
    pub fn output_template(&self) -> Option<&str> {
        if self.format.is_empty() {
            None
        } else {
            Some(&self.format)
        }
    }

    /// (verbe, précision) si le gabarit est un format flottant.
    pub fn float_format(&self) -> Option<(char, usize)> {
        self.float_verb.map(|v| (v, self.float_prec))
    }

    /// Gabarit à deux emplacements (numérateur puis dénominateur).
    pub fn rat_format(&self) -> &str {
        &self.rat_format
    }
}

/// "%.12f" -> Some(12) ; "%f" -> None ; "%8.3e" -> Some(3)
fn precision_du_gabarit(format: &str) -> Option<usize> {
    let pos = format.rfind('%')?;
    let apres = &format[pos + 1..];
    let point = apres.find('.')?;
    let chiffres: String = apres[point + 1..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if chiffres.is_empty() {
        // "%.f" : précision explicite nulle
        return Some(0);
    }
    // que des chiffres : l'échec ne peut venir que d'un débordement
    Some(chiffres.parse().unwrap_or(usize::MAX))
}

impl TryFrom<ConfigFichier> for Config {
    type Error = ConfigError;

    fn try_from(f: ConfigFichier) -> Result<Self, Self::Error> {
        Ok(Config::new()
            .with_input_base(f.input_base)?
            .with_output_base(f.output_base)?
            .with_format(&f.format))
    }
}

impl From<Config> for ConfigFichier {
    fn from(c: Config) -> Self {
        ConfigFichier {
            input_base: c.input_base,
            output_base: c.output_base,
            format: c.format,
        }
    }
}
