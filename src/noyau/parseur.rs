// src/noyau/parseur.rs
//
// Descente récursive -> ExpressionNode
// Grammaire (de la plus faible à la plus forte précédence):
//
//   expression := term (('+' | '-') term)*        gauche
//   term       := power (('*' | '/') power)*      gauche
//   power      := unary ('^' power)?              droite
//   unary      := '-' unary | postfix
//   postfix    := atom ('!')*                     lie plus fort que '-'
//   atom       := number | constante | fonction '(' expression ')' | '(' expression ')'
//
// Règles:
// - -5! = -(5!) ; 2^3^2 = 2^(3^2) ; -2^2 = (-2)^2 (le '-' est lu par `unary`, sous '^')
// - fonction connue non suivie de '(' => SyntaxError
// - ident inconnu : Constant(nom) ou Call(nom, ..) => NameError à l’évaluation
// - garde-fous : profondeur d’imbrication + nombre de jetons bornés

use tracing::debug;

use super::erreur::{EvaluatorError, Resultat};
use super::expr::{BinaryOp, ExpressionNode};
use super::jetons::{Operateur, Token, TokenKind};
use super::symboles::SymbolTable;

/// Imbrication maximale (parenthèses, '-' et '^' en chaîne).
pub const PROFONDEUR_MAX: usize = 256;

/// Nombre maximal de jetons acceptés (End compris).
pub const JETONS_MAX: usize = 4096;

/// Construit l’arbre à partir des jetons produits par `tokenize`.
pub fn parse(tokens: &[Token]) -> Resultat<ExpressionNode> {
    let Some(dernier) = tokens.last() else {
        return Err(EvaluatorError::syntaxe(0, "expression vide"));
    };
    if dernier.kind != TokenKind::End {
        return Err(EvaluatorError::syntaxe(
            dernier.position,
            "flux de jetons non terminé",
        ));
    }
    if tokens.len() == 1 {
        return Err(EvaluatorError::syntaxe(0, "expression vide"));
    }
    if tokens.len() > JETONS_MAX {
        return Err(EvaluatorError::syntaxe(0, "expression trop longue"));
    }

    let mut p = Parseur {
        jetons: tokens,
        pos: 0,
        profondeur: 0,
        table: SymbolTable::standard(),
    };

    let arbre = p.expression()?;

    // Tout doit être consommé
    let reste = p.courant();
    if reste.kind != TokenKind::End {
        let message = if reste.kind == TokenKind::RParen {
            "parenthèse fermante sans ouvrante".to_string()
        } else {
            format!("jeton inattendu : '{}'", reste.text)
        };
        return Err(EvaluatorError::syntaxe(reste.position, message));
    }

    debug!(noeuds = arbre.taille(), "arbre construit");
    Ok(arbre)
}

struct Parseur<'a> {
    jetons: &'a [Token],
    pos: usize,
    profondeur: usize,
    table: &'static SymbolTable,
}

impl<'a> Parseur<'a> {
    fn courant(&self) -> &'a Token {
        // `parse` garantit un End final : on ne dépasse jamais.
        &self.jetons[self.pos.min(self.jetons.len() - 1)]
    }

    fn avancer(&mut self) -> &'a Token {
        let t = self.courant();
        if t.kind != TokenKind::End {
            self.pos += 1;
        }
        t
    }

    fn operateur_courant(&self) -> Option<Operateur> {
        match self.courant().kind {
            TokenKind::Operator(op) => Some(op),
            _ => None,
        }
    }

    fn descendre(&mut self) -> Resultat<()> {
        self.profondeur += 1;
        if self.profondeur > PROFONDEUR_MAX {
            return Err(EvaluatorError::syntaxe(
                self.courant().position,
                "expression trop imbriquée",
            ));
        }
        Ok(())
    }

    fn remonter(&mut self) {
        self.profondeur -= 1;
    }

    fn expression(&mut self) -> Resultat<ExpressionNode> {
        let mut gauche = self.term()?;
        loop {
            let op = match self.operateur_courant() {
                Some(Operateur::Plus) => BinaryOp::Add,
                Some(Operateur::Moins) => BinaryOp::Sub,
                _ => break,
            };
            self.avancer();
            let droite = self.term()?;
            gauche = ExpressionNode::binaire(op, gauche, droite);
        }
        Ok(gauche)
    }

    fn term(&mut self) -> Resultat<ExpressionNode> {
        let mut gauche = self.power()?;
        loop {
            let op = match self.operateur_courant() {
                Some(Operateur::Fois) => BinaryOp::Mul,
                Some(Operateur::Divise) => BinaryOp::Div,
                _ => break,
            };
            self.avancer();
            let droite = self.power()?;
            gauche = ExpressionNode::binaire(op, gauche, droite);
        }
        Ok(gauche)
    }

    fn power(&mut self) -> Resultat<ExpressionNode> {
        let base = self.unary()?;
        if self.operateur_courant() != Some(Operateur::Puissance) {
            return Ok(base);
        }
        self.avancer();

        // droite : récursion (associativité à droite)
        self.descendre()?;
        let exposant = self.power();
        self.remonter();

        Ok(ExpressionNode::binaire(BinaryOp::Pow, base, exposant?))
    }

    fn unary(&mut self) -> Resultat<ExpressionNode> {
        if self.operateur_courant() != Some(Operateur::Moins) {
            return self.postfix();
        }
        self.avancer();

        self.descendre()?;
        let x = self.unary();
        self.remonter();

        Ok(ExpressionNode::neg(x?))
    }

    fn postfix(&mut self) -> Resultat<ExpressionNode> {
        let mut x = self.atom()?;
        let mut n = 0usize;
        while self.operateur_courant() == Some(Operateur::Factorielle) {
            n += 1;
            if n > PROFONDEUR_MAX {
                return Err(EvaluatorError::syntaxe(
                    self.courant().position,
                    "trop de factorielles",
                ));
            }
            self.avancer();
            x = ExpressionNode::factorielle(x);
        }
        Ok(x)
    }

    fn atom(&mut self) -> Resultat<ExpressionNode> {
        let t = self.avancer();

        match t.kind {
            TokenKind::Number => {
                let v: f64 = t.text.parse().map_err(|_| {
                    EvaluatorError::syntaxe(t.position, format!("nombre invalide : '{}'", t.text))
                })?;
                if !v.is_finite() {
                    return Err(EvaluatorError::OverflowError);
                }
                Ok(ExpressionNode::Number(v))
            }

            TokenKind::Identifier => self.identifiant(t),

            TokenKind::LParen => {
                let x = self.entre_parentheses(t)?;
                Ok(x)
            }

            TokenKind::RParen => Err(EvaluatorError::syntaxe(
                t.position,
                "parenthèse fermante inattendue",
            )),

            TokenKind::Operator(op) => Err(EvaluatorError::syntaxe(
                t.position,
                format!("opérande attendu avant '{}'", op.symbole()),
            )),

            TokenKind::End => Err(EvaluatorError::syntaxe(
                t.position,
                "fin d’expression inattendue",
            )),
        }
    }

    fn identifiant(&mut self, t: &'a Token) -> Resultat<ExpressionNode> {
        let nom = t.text.as_str();
        let suivi_de_parenthese = self.courant().kind == TokenKind::LParen;

        if let Some(spec) = self.table.lookup_function(nom) {
            if !suivi_de_parenthese {
                return Err(EvaluatorError::syntaxe(
                    t.position,
                    format!("'(' attendu après la fonction '{nom}'"),
                ));
            }
            if spec.arity != 1 {
                return Err(EvaluatorError::syntaxe(
                    t.position,
                    format!("'{nom}' s’écrit avec l’opérateur '^'"),
                ));
            }
        }

        if suivi_de_parenthese {
            let ouvrante = self.avancer();
            let arg = self.entre_parentheses(ouvrante)?;
            return Ok(ExpressionNode::appel(nom, arg));
        }

        Ok(ExpressionNode::Constant(nom.to_string()))
    }

    /// `ouvrante` vient d’être consommée ; lit `expression ')'`.
    fn entre_parentheses(&mut self, ouvrante: &'a Token) -> Resultat<ExpressionNode> {
        self.descendre()?;
        let x = self.expression();
        self.remonter();
        let x = x?;

        if self.courant().kind != TokenKind::RParen {
            return Err(EvaluatorError::syntaxe(
                ouvrante.position,
                "parenthèse non fermée",
            ));
        }
        self.avancer();
        Ok(x)
    }
}
