// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus)
// - Tactile : pavé façon Casio, focus redonné après clic (focus_entree)
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;

use super::etat::{AppCalc, InsertKind};

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice scientifique");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_historique(ui);

                ui.add_space(8.0);
                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Entrée :");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                // DEG / RAD : mode de la session, passé au noyau à chaque "="
                let resp = ui
                    .add_sized([56.0, 24.0], egui::Button::new(self.mode_angle.libelle()))
                    .on_hover_text("Bascule degrés / radians");
                if resp.clicked() {
                    self.basculer_mode();
                }
            });
        });

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 2+3*4, sin(30), √(16)+2!")
                .id_source("entree_edit")
                .code_editor(),
        );

        // Si on a cliqué un bouton, on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.evaluer();
        }

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        } else if !self.affichage.is_empty() {
            ui.add_space(6.0);
            Self::champ_monospace(ui, "affichage_out", &self.affichage, 1);
        }
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_scientifique")
            .num_columns(6)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "sin", "sin(", InsertKind::Func);
                self.bouton_insert(ui, "cos", "cos(", InsertKind::Func);
                self.bouton_insert(ui, "tan", "tan(", InsertKind::Func);
                self.bouton_insert(ui, "log", "log(", InsertKind::Func);
                self.bouton_insert(ui, "ln", "ln(", InsertKind::Func);
                self.bouton_insert(ui, "√", "√(", InsertKind::Func);
                ui.end_row();

                self.bouton_insert(ui, "asin", "asin(", InsertKind::Func);
                self.bouton_insert(ui, "acos", "acos(", InsertKind::Func);
                self.bouton_insert(ui, "atan", "atan(", InsertKind::Func);
                self.bouton_insert(ui, "π", "π", InsertKind::Word);
                self.bouton_insert(ui, "e", "e", InsertKind::Word);
                self.bouton_insert(ui, "!", "!", InsertKind::Postfix);
                ui.end_row();

                self.bouton_insert(ui, "7", "7", InsertKind::Digit);
                self.bouton_insert(ui, "8", "8", InsertKind::Digit);
                self.bouton_insert(ui, "9", "9", InsertKind::Digit);
                self.bouton_action(ui, "⌫", "Efface le dernier symbole", Action::Backspace);
                self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
                self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);
                ui.end_row();

                self.bouton_insert(ui, "4", "4", InsertKind::Digit);
                self.bouton_insert(ui, "5", "5", InsertKind::Digit);
                self.bouton_insert(ui, "6", "6", InsertKind::Digit);
                self.bouton_insert(ui, "*", "*", InsertKind::Op);
                self.bouton_insert(ui, "/", "/", InsertKind::Op);
                self.bouton_insert(ui, "^", "^", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "1", "1", InsertKind::Digit);
                self.bouton_insert(ui, "2", "2", InsertKind::Digit);
                self.bouton_insert(ui, "3", "3", InsertKind::Digit);
                self.bouton_insert(ui, "+", "+", InsertKind::Op);
                self.bouton_insert(ui, "-", "-", InsertKind::Op);
                self.bouton_insert(ui, "(", "(", InsertKind::OpenParen);
                ui.end_row();

                self.bouton_insert(ui, "0", "0", InsertKind::Digit);
                self.bouton_insert(ui, ".", ".", InsertKind::Digit);
                ui.label("");
                self.bouton_action(ui, "=", "Évaluer", Action::Evaluer);
                ui.label("");
                self.bouton_insert(ui, ")", ")", InsertKind::CloseParen);
                ui.end_row();
            });
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        ui.label("Historique :");
        if self.historique.is_empty() {
            ui.monospace("(vide)");
            return;
        }
        // clic = reprendre le résultat de la ligne
        let mut reprise = None;
        for (i, ligne) in self.historique.iter().enumerate() {
            let resp = ui.push_id(("historique", i), |ui| {
                ui.add(
                    egui::Label::new(egui::RichText::new(ligne).monospace())
                        .sense(egui::Sense::click()),
                )
            });
            if resp.inner.clicked() {
                reprise = ligne.rsplit(" = ").next().map(str::to_string);
            }
        }
        if let Some(valeur) = reprise {
            self.entree = valeur;
            self.focus_entree = true;
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "Arbre", "demarche_arbre", &self.demarche.arbre);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 32.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
                Action::Evaluer => self.evaluer(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([56.0, 32.0], egui::Button::new(label));
        if resp.clicked() {
            self.inserer(to_insert, kind);
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ResetTotal,
    Backspace,
    Evaluer,
}
