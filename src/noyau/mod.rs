//! Noyau — évaluateur scientifique sûr
//!
//! Organisation interne :
//! - erreur.rs   : taxonomie EvaluatorError (syntaxe / nom / domaine / dépassement)
//! - jetons.rs   : tokenisation (+ alias π, √)
//! - symboles.rs : table FERMÉE des constantes et fonctions
//! - expr.rs     : arbre d’expression
//! - parseur.rs  : descente récursive (précédence, '!' postfixe)
//! - trig.rs     : mode d’angle + angles spéciaux (degrés)
//! - eval.rs     : pipeline complet
//! - format.rs   : affichage des résultats + forme canonique de l’arbre
//!
//! Aucune exécution de code arbitraire : grammaire close + table fixe.

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod parseur;
pub mod symboles;
pub mod trig;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::{DomainReason, EvaluatorError};
pub use eval::{eval_expression, evaluate, evaluate_tree, Calcul, Demarche};
pub use expr::ExpressionNode;
pub use format::format_resultat;
pub use jetons::{format_tokens, tokenize, Token, TokenKind};
pub use parseur::parse;
pub use symboles::SymbolTable;
pub use trig::AngleMode;
