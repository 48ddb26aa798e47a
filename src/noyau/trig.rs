// src/noyau/trig.rs
//
// Couche trigonométrique sensible au mode d’angle
// -----------------------------------------------
// - AngleMode : paramètre PAR APPEL (jamais d’état global)
// - sin/cos/tan : argument converti en radians avant l’implémentation f64
// - asin/acos/atan : résultat canonique en radians, converti en degrés si besoin
// - Degrés : angles spéciaux (multiples de 30° et 45°) => valeurs exactes
//   via coeff = deg/180 rationnel, réduit modulo la période

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};
use serde::Deserialize;

use std::f64::consts::FRAC_1_SQRT_2;

use super::erreur::DomainReason;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    Degrees,
    #[default]
    Radians,
}

impl AngleMode {
    pub fn libelle(self) -> &'static str {
        match self {
            Self::Degrees => "DEG",
            Self::Radians => "RAD",
        }
    }

    pub fn bascule(self) -> Self {
        match self {
            Self::Degrees => Self::Radians,
            Self::Radians => Self::Degrees,
        }
    }

    /// Angle saisi -> radians.
    pub fn vers_radians(self, x: f64) -> f64 {
        match self {
            Self::Degrees => x.to_radians(),
            Self::Radians => x,
        }
    }

    /// Radians -> angle affiché.
    pub fn depuis_radians(self, x: f64) -> f64 {
        match self {
            Self::Degrees => x.to_degrees(),
            Self::Radians => x,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
}

const RACINE3_SUR_2: f64 = 0.866_025_403_784_438_6;
const RACINE3: f64 = 1.732_050_807_568_877_2;
const RACINE3_SUR_3: f64 = 0.577_350_269_189_625_8;

/// sin/cos/tan d’un angle exprimé dans `mode`.
pub fn trig_directe(f: TrigFn, angle: f64, mode: AngleMode) -> Result<f64, DomainReason> {
    if mode == AngleMode::Degrees {
        if let Some(v) = angle_special_degres(f, angle) {
            return v;
        }
    }

    let r = mode.vers_radians(angle);
    Ok(match f {
        TrigFn::Sin => r.sin(),
        TrigFn::Cos => r.cos(),
        TrigFn::Tan => r.tan(),
    })
}

/// Reconnaît les angles spéciaux (en degrés).
///
/// Retour:
/// - Some(Ok(v)) si reconnu
/// - Some(Err(UndefinedTangent)) pour tan(90° + k·180°)
/// - None si non reconnu (ou angle non fini)
pub fn angle_special_degres(f: TrigFn, degres: f64) -> Option<Result<f64, DomainReason>> {
    // 1) coeff·π = degres/180 (exact : un f64 fini est un rationnel dyadique)
    let coeff = BigRational::from_float(degres)? / BigRational::from_integer(BigInt::from(180));

    // 2) réduire modulo 2 (période commune sin/cos ; tan a période 1, contenue dans 2)
    let reduit = mod_rationnel(&coeff, 2);

    // 3) convertir en k/n "petit"
    let (k, n) = rational_to_small_kn(&reduit)?;

    let v = match f {
        TrigFn::Sin => match (k, n) {
            (0, _) | (1, 1) => 0.0,
            (1, 6) | (5, 6) => 0.5,
            (7, 6) | (11, 6) => -0.5,
            (1, 4) | (3, 4) => FRAC_1_SQRT_2,
            (5, 4) | (7, 4) => -FRAC_1_SQRT_2,
            (1, 3) | (2, 3) => RACINE3_SUR_2,
            (4, 3) | (5, 3) => -RACINE3_SUR_2,
            (1, 2) => 1.0,
            (3, 2) => -1.0,
            _ => return None,
        },

        TrigFn::Cos => match (k, n) {
            (0, _) => 1.0,
            (1, 1) => -1.0,
            (1, 6) | (11, 6) => RACINE3_SUR_2,
            (5, 6) | (7, 6) => -RACINE3_SUR_2,
            (1, 4) | (7, 4) => FRAC_1_SQRT_2,
            (3, 4) | (5, 4) => -FRAC_1_SQRT_2,
            (1, 3) | (5, 3) => 0.5,
            (2, 3) | (4, 3) => -0.5,
            (1, 2) | (3, 2) => 0.0,
            _ => return None,
        },

        TrigFn::Tan => match (k, n) {
            (0, _) | (1, 1) => 0.0,
            (1, 6) | (7, 6) => RACINE3_SUR_3,
            (5, 6) | (11, 6) => -RACINE3_SUR_3,
            (1, 4) | (5, 4) => 1.0,
            (3, 4) | (7, 4) => -1.0,
            (1, 3) | (4, 3) => RACINE3,
            (2, 3) | (5, 3) => -RACINE3,
            (1, 2) | (3, 2) => return Some(Err(DomainReason::UndefinedTangent)),
            _ => return None,
        },
    };

    Some(Ok(v))
}

/* ------------------------ Outils ------------------------ */

/// r mod m, dans [0, m).
fn mod_rationnel(r: &BigRational, m: i64) -> BigRational {
    let m = BigRational::from_integer(BigInt::from(m));
    let q = (r / &m).floor();
    r - q * m
}

/// Convertit un rationnel de [0, 2) en (k,n) i64 réduit.
/// Accepte seulement n ∈ {1,2,3,4,6}.
fn rational_to_small_kn(r: &BigRational) -> Option<(i64, i64)> {
    if r.is_zero() {
        return Some((0, 1));
    }
    // BigRational est toujours réduit (pgcd = 1)
    let numer = r.numer().to_i64()?;
    let denom = r.denom().to_i64()?;

    if [1, 2, 3, 4, 6].contains(&denom) {
        Some((numer, denom))
    } else {
        None
    }
}
