// src/noyau/format.rs

use std::fmt;

use super::expr::{ExpressionNode, UnaryOp};

/// Tolérance d’arrondi d’affichage (|x - round(x)| < 1e-12 => entier).
pub const TOLERANCE_AFFICHAGE: f64 = 1e-12;

/* ------------------------ Résultat ------------------------ */

/// Texte d’un résultat pour l’écran / l’historique.
///
/// - `f64` Display : décimal le plus court qui relit la même valeur, jamais
///   d’exposant => re-tokenisable tel quel
/// - `-0` affiché `0`
/// - `arrondi` : politique de présentation (pas un effet caché de l’évaluation)
pub fn format_resultat(valeur: f64, arrondi: bool) -> String {
    let mut v = valeur;
    if arrondi && (v - v.round()).abs() < TOLERANCE_AFFICHAGE {
        v = v.round();
    }
    if v == 0.0 {
        // couvre -0.0
        return "0".to_string();
    }
    format!("{v}")
}

/* ------------------------ Arbre (forme canonique) ------------------------ */

/// Forme entièrement parenthésée, relisible par le parseur.
impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ExpressionNode::*;

        match self {
            Number(v) => write!(f, "{}", format_resultat(*v, false)),
            Constant(nom) => write!(f, "{nom}"),
            Unary(UnaryOp::Neg, x) => write!(f, "(-{x})"),
            Binary(op, a, b) => write!(f, "({a} {} {b})", op.symbole()),
            Call(nom, x) => write!(f, "{nom}({x})"),
            Factorial(x) => write!(f, "({x})!"),
        }
    }
}
