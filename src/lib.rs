//! Calculatrice scientifique : noyau d’évaluation sûr + réglages.
//!
//! Les front-ends (egui natif/web, ligne de commande) appellent seulement
//! `noyau::evaluate` (ou `eval_expression` pour la démarche) et
//! `noyau::format_resultat`.

pub mod noyau;
pub mod reglages;
