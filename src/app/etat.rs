//! src/app/etat.rs
//!
//! État de session (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, affichage, erreur, mode d’angle,
//! historique, démarche) et offrir les actions des touches sans logique d’affichage.
//!
//! Contrats :
//! - Le noyau est appelé en un seul endroit (`evaluer`), avec le mode de la session.
//! - Succès : l’entrée devient le résultat formaté, "entrée = sortie" part en tête d’historique.
//! - Erreur : l’entrée est conservée, seul le message change.

use std::collections::VecDeque;

use calculatrice_sci::noyau::{self, AngleMode, Demarche};
use calculatrice_sci::reglages::Reglages;
use tracing::{debug, info};

/// Motifs retirés d’un coup par ⌫ (ouvrants de fonction + constantes).
const MOTIFS_EFFACEMENT: [&str; 15] = [
    "asin(", "acos(", "atan(", "sqrt(", "fact(", "sin(", "cos(", "tan(", "log(", "ln(", "abs(",
    "√(", "pi", "π", "e",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertKind {
    Digit,
    Word,
    Func,
    Op,
    Postfix,
    OpenParen,
    CloseParen,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub affichage: String, // dernier résultat formaté
    pub erreur: String,    // "Erreur : …" (vide si aucune)

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub mode_angle: AngleMode,
    pub arrondi: bool,
    pub historique_max: usize,

    // plus récent en tête
    pub historique: VecDeque<String>,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::depuis_reglages(&Reglages::default())
    }
}

impl AppCalc {
    pub fn depuis_reglages(r: &Reglages) -> Self {
        Self {
            entree: String::new(),
            affichage: String::new(),
            erreur: String::new(),
            demarche: Demarche::default(),
            mode_angle: r.mode_angle,
            arrondi: r.arrondi_affichage,
            historique_max: r.historique_max.max(1),
            historique: VecDeque::new(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    /// AC : remise à zéro totale (entrée + affichage + historique). Le mode est conservé.
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.affichage.clear();
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.historique.clear();
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (et l’erreur en cours).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.erreur.clear();
        self.focus_entree = true;
    }

    pub fn basculer_mode(&mut self) {
        self.mode_angle = self.mode_angle.bascule();
        debug!(mode = self.mode_angle.libelle(), "mode d’angle");
        self.focus_entree = true;
    }

    /// Backspace “intelligent” : retire d’un coup les motifs utiles ("sin(", "pi", etc.).
    pub fn backspace_entree(&mut self) {
        retirer_espaces_finaux(&mut self.entree);
        if self.entree.is_empty() {
            return;
        }

        let motif = MOTIFS_EFFACEMENT
            .iter()
            .find(|pat| self.entree.ends_with(*pat) && !colle_a_un_mot(&self.entree, pat));

        match motif {
            Some(pat) => {
                let garde = self.entree.len() - pat.len();
                self.entree.truncate(garde);
            }
            None => {
                self.entree.pop();
            }
        }
        retirer_espaces_finaux(&mut self.entree);
        self.focus_entree = true;
    }

    /// Insertion d’une touche, avec espacement lisible.
    pub fn inserer(&mut self, texte: &str, kind: InsertKind) {
        if texte.is_empty() {
            return;
        }

        match kind {
            InsertKind::CloseParen | InsertKind::Postfix => {
                retirer_espaces_finaux(&mut self.entree);
                self.entree.push_str(texte);
            }
            InsertKind::OpenParen | InsertKind::Func => {
                if let Some(c) = dernier_visible(&self.entree) {
                    if c.is_alphanumeric() || c == ')' || c == '!' {
                        self.entree.push(' ');
                    }
                }
                self.entree.push_str(texte);
            }
            InsertKind::Op => {
                retirer_espaces_finaux(&mut self.entree);
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
                self.entree.push_str(texte);
                self.entree.push(' ');
            }
            InsertKind::Digit => {
                // chiffres: pas d’espaces auto
                self.entree.push_str(texte);
            }
            InsertKind::Word => {
                // mots: espace si juste avant c’est un chiffre, une lettre ou un postfixe
                if !self.entree.ends_with(char::is_whitespace) {
                    if let Some(c) = dernier_visible(&self.entree) {
                        if c.is_alphanumeric() || c == ')' || c == '!' {
                            self.entree.push(' ');
                        }
                    }
                }
                self.entree.push_str(texte);
            }
        }

        self.focus_entree = true;
    }

    /* ------------------------ "=" ------------------------ */

    /// Évalue l’entrée via le noyau, dans le mode courant de la session.
    pub fn evaluer(&mut self) {
        let source = self.entree.trim().to_string();

        match noyau::eval_expression(&source, self.mode_angle) {
            Ok(calcul) => {
                let sortie = noyau::format_resultat(calcul.valeur, self.arrondi);
                self.set_resultat(&source, sortie, calcul.demarche);
            }
            Err(e) => self.set_erreur(e.to_string()),
        }
    }

    /// Erreur : l’entrée est conservée pour correction.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = format!("Erreur : {}", msg.into());
        // démarche invalide => on l’efface
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    pub fn set_resultat(&mut self, source: &str, sortie: String, demarche: Demarche) {
        info!(entree = source, sortie = %sortie, "résultat");

        self.historique.push_front(format!("{source} = {sortie}"));
        self.historique.truncate(self.historique_max);

        self.erreur.clear();
        self.entree = sortie.clone();
        self.affichage = sortie;
        self.demarche = demarche;
        self.focus_entree = true;
    }
}

fn retirer_espaces_finaux(s: &mut String) {
    let garde = s.trim_end().len();
    s.truncate(garde);
}

fn dernier_visible(s: &str) -> Option<char> {
    s.chars().rev().find(|c| !c.is_whitespace())
}

/// "e" final de "acos(te" : lettre d’un mot plus long, pas la constante.
fn colle_a_un_mot(s: &str, motif: &str) -> bool {
    let avant = &s[..s.len() - motif.len()];
    let debut_alpha = motif.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    debut_alpha && avant.chars().next_back().is_some_and(|c| c.is_ascii_alphabetic())
}
