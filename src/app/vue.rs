// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Aucun champ texte egui : le tampon du noyau est la seule source de vérité
// - Tactile : gros boutons ; chaque clic devient une `Commande`
// - Aperçu en direct sous l’entrée, indicateur de parenthèses, 3 derniers calculs

use eframe::egui;

use super::etat::{AppCalc, Commande};
use crate::noyau::jetons::Fonction;
use crate::noyau::normalise::{SYMBOLE_E, SYMBOLE_PI};
use crate::noyau::Apercu;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice Aperçu");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_touches(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_historique(ui);

                ui.add_space(8.0);
                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");
        let texte = self.texte_avec_curseur();
        Self::champ_monospace(ui, "entree", &texte, 1);

        ui.horizontal(|ui| {
            let p = self.etat.parentheses;
            if p.est_equilibre() {
                ui.label(p.to_string());
            } else {
                ui.colored_label(ui.visuals().warn_fg_color, p.to_string());
            }
        });

        ui.add_space(4.0);

        match &self.etat.apercu {
            Apercu::Vide => {
                ui.monospace(" ");
            }
            Apercu::Valeur(v) => {
                ui.monospace(format!("= {v}"));
            }
            // Parenthèses : une indication, pas une faute
            Apercu::Erreur(e) if e.est_parentheses() => {
                ui.colored_label(ui.visuals().warn_fg_color, e.to_string());
            }
            Apercu::Erreur(e) => {
                ui.colored_label(ui.visuals().error_fg_color, e.to_string());
            }
        }
    }

    fn ui_touches(&mut self, ui: &mut egui::Ui) {
        // Actions
        ui.horizontal(|ui| {
            self.bouton_action(ui, "C", "Efface l’entrée", Commande::Vider);
            self.bouton_action(ui, "DEL", "Efface avant le curseur", Commande::EffacerAvant);
            self.bouton_action(ui, "⌦", "Efface après le curseur", Commande::EffacerApres);

            ui.separator();

            self.bouton_action(ui, "⇤", "Curseur au début", Commande::Debut);
            self.bouton_action(ui, "◀", "Curseur à gauche", Commande::Deplacer(-1));
            self.bouton_action(ui, "▶", "Curseur à droite", Commande::Deplacer(1));
            self.bouton_action(ui, "⇥", "Curseur à la fin", Commande::Fin);
        });

        ui.add_space(8.0);

        // Fonctions + raccourcis
        ui.horizontal_wrapped(|ui| {
            for f in Fonction::TOUTES {
                self.bouton(ui, f.nom(), Commande::Fonction(f));
            }

            ui.separator();

            self.bouton(ui, "x²", Commande::Carre);
            self.bouton(ui, "x³", Commande::Cube);
            self.bouton(ui, "1/x", Commande::Inverse);
            self.bouton(ui, "xʸ", Commande::Inserer("^".into()));
        });

        ui.add_space(8.0);

        self.ui_pave_numerique(ui);
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        let pi = SYMBOLE_PI.to_string();
        let e = SYMBOLE_E.to_string();

        let lignes: [[(&str, Commande); 5]; 5] = [
            [
                ("(", Commande::Inserer("(".into())),
                (")", Commande::Inserer(")".into())),
                ("%", Commande::Inserer("%".into())),
                (pi.as_str(), Commande::Inserer(pi.clone())),
                (e.as_str(), Commande::Inserer(e.clone())),
            ],
            [
                ("7", Commande::Inserer("7".into())),
                ("8", Commande::Inserer("8".into())),
                ("9", Commande::Inserer("9".into())),
                ("÷", Commande::Inserer("÷".into())),
                ("√", Commande::Fonction(Fonction::Sqrt)),
            ],
            [
                ("4", Commande::Inserer("4".into())),
                ("5", Commande::Inserer("5".into())),
                ("6", Commande::Inserer("6".into())),
                ("×", Commande::Inserer("×".into())),
                ("±", Commande::Negation),
            ],
            [
                ("1", Commande::Inserer("1".into())),
                ("2", Commande::Inserer("2".into())),
                ("3", Commande::Inserer("3".into())),
                ("-", Commande::Inserer("-".into())),
                ("EE", Commande::Inserer("e".into())),
            ],
            [
                ("0", Commande::Inserer("0".into())),
                (".", Commande::Inserer(".".into())),
                ("00", Commande::Inserer("00".into())),
                ("+", Commande::Inserer("+".into())),
                ("=", Commande::Evaluer),
            ],
        ];

        egui::Grid::new("pave_numerique")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in lignes {
                    for (label, commande) in ligne {
                        self.bouton(ui, label, commande);
                    }
                    ui.end_row();
                }
            });
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        ui.label("Historique :");
        let lignes = if self.historique.is_empty() {
            "(aucun calcul)".to_string()
        } else {
            self.historique
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        };
        Self::champ_monospace(ui, "historique", &lignes, 3);
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                let d = &self.demarche;
                Self::champ_demarche(ui, "Normalisée", "demarche_normalisee", &d.normalisee);
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &d.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &d.rpn);
                Self::champ_demarche(ui, "Arbre", "demarche_arbre", &d.arbre);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 1);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule, cadre visuel via Frame + Label monospace.
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

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, commande: Commande) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            self.appliquer(commande);
        }
    }

    fn bouton(&mut self, ui: &mut egui::Ui, label: &str, commande: Commande) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if resp.clicked() {
            self.appliquer(commande);
        }
    }
}
