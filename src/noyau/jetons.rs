// src/noyau/jetons.rs

use super::erreur::{EvaluatorError, Resultat};

/// Opérateurs à un caractère.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance, // ^
    Factorielle, // ! (postfixe)
}

impl Operateur {
    fn depuis_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Plus),
            '-' => Some(Self::Moins),
            '*' => Some(Self::Fois),
            '/' => Some(Self::Divise),
            '^' => Some(Self::Puissance),
            '!' => Some(Self::Factorielle),
            _ => None,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Moins => '-',
            Self::Fois => '*',
            Self::Divise => '/',
            Self::Puissance => '^',
            Self::Factorielle => '!',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    // NOTE: le parseur décidera si c’est une constante ou une fonction.
    Identifier,
    Operator(Operateur),
    LParen,
    RParen,
    End,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Texte canonique (minuscules, alias unicode remplacés).
    pub text: String,
    /// Index de caractère du début du jeton.
    pub position: usize,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - décimaux (ex: 12, 3.5, .5, 2.), un seul '.' par nombre
/// - opérateurs + - * / ^ !
/// - parenthèses ( )
/// - identifiants [a-zA-Z][a-zA-Z0-9]* (normalisés en minuscules)
/// - π (équivaut à ident("pi")), √ (équivaut à ident("sqrt"))
///
/// Le dernier jeton est toujours `End` (position = longueur en caractères).
pub fn tokenize(s: &str) -> Resultat<Vec<Token>> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c == '(' {
            out.push(Token::new(TokenKind::LParen, "(", i));
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Token::new(TokenKind::RParen, ")", i));
            i += 1;
            continue;
        }

        if let Some(op) = Operateur::depuis_char(c) {
            out.push(Token::new(TokenKind::Operator(op), c.to_string(), i));
            i += 1;
            continue;
        }

        // Alias unicode
        if c == 'π' {
            out.push(Token::new(TokenKind::Identifier, "pi", i));
            i += 1;
            continue;
        }
        if c == '√' {
            out.push(Token::new(TokenKind::Identifier, "sqrt", i));
            i += 1;
            continue;
        }

        // Identifiants ASCII : lettre puis alphanumériques.
        // "e" seul = constante d’Euler ; "exp", "e2" etc. restent un seul mot.
        if c.is_ascii_alphabetic() {
            let start = i;
            i += 1;
            while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Token::new(
                TokenKind::Identifier,
                word.to_ascii_lowercase(),
                start,
            ));
            continue;
        }

        // Nombre décimal
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            let mut points = 0usize;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                if chars[i] == '.' {
                    points += 1;
                    if points > 1 {
                        return Err(EvaluatorError::syntaxe(i, "nombre mal formé (deux points)"));
                    }
                }
                i += 1;
            }
            let texte: String = chars[start..i].iter().collect();
            if texte == "." {
                return Err(EvaluatorError::syntaxe(start, "point isolé"));
            }
            out.push(Token::new(TokenKind::Number, texte, start));
            continue;
        }

        return Err(EvaluatorError::syntaxe(
            i,
            format!("caractère non reconnu : '{c}'"),
        ));
    }

    out.push(Token::new(TokenKind::End, "", chars.len()));
    Ok(out)
}

/// Format utilitaire (diagnostic/“démarche”) : liste de jetons en texte.
/// La sortie est re-tokenisable et donne les mêmes genres/textes.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter(|t| t.kind != TokenKind::End)
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
