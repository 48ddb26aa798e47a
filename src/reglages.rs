//! Réglages utilisateur (fichier TOML optionnel).
//!
//! Exemple :
//! ```toml
//! mode_angle = "degrees"
//! arrondi_affichage = true
//! historique_max = 8
//! ```
//!
//! Fichier absent ou invalide => valeurs par défaut (avec un avertissement).

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::noyau::AngleMode;

/// Historique affiché par défaut (dernières entrées).
const HISTORIQUE_DEFAUT: usize = 8;

/// Garde-fou : on borne l’historique (anti-abus).
const HISTORIQUE_MAX: usize = 200;

#[derive(Debug, Error)]
pub enum ErreurReglages {
    #[error("lecture du fichier de réglages impossible : {0}")]
    Lecture(#[from] std::io::Error),

    #[error("fichier de réglages invalide : {0}")]
    Format(#[from] toml::de::Error),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Reglages {
    pub mode_angle: AngleMode,
    /// Arrondi d’affichage des quasi-entiers (présentation seulement).
    pub arrondi_affichage: bool,
    pub historique_max: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            mode_angle: AngleMode::Radians,
            arrondi_affichage: true,
            historique_max: HISTORIQUE_DEFAUT,
        }
    }
}

impl Reglages {
    pub fn depuis_toml(texte: &str) -> Result<Self, ErreurReglages> {
        let mut r: Reglages = toml::from_str(texte)?;
        r.historique_max = r.historique_max.clamp(1, HISTORIQUE_MAX);
        Ok(r)
    }

    pub fn charger(chemin: &Path) -> Result<Self, ErreurReglages> {
        let texte = std::fs::read_to_string(chemin)?;
        Self::depuis_toml(&texte)
    }

    /// Comme `charger`, mais n’échoue jamais : défauts + `warn!`.
    pub fn charger_ou_defaut(chemin: Option<&Path>) -> Self {
        let Some(chemin) = chemin else {
            return Self::default();
        };
        match Self::charger(chemin) {
            Ok(r) => r,
            Err(e) => {
                warn!(chemin = %chemin.display(), erreur = %e, "réglages ignorés");
                Self::default()
            }
        }
    }
}
