// src/noyau/expr.rs
//
// Arbre d’expression (flottants).
// - Construit de bas en haut par le parseur.
// - Chaque noeud possède ses enfants (Box), arbre immuable après construction.
// - Durée de vie : un seul appel à evaluate.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn symbole(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExpressionNode {
    Number(f64),
    Constant(String),
    Unary(UnaryOp, Box<ExpressionNode>),
    Binary(BinaryOp, Box<ExpressionNode>, Box<ExpressionNode>),
    Call(String, Box<ExpressionNode>),
    Factorial(Box<ExpressionNode>),
}

impl ExpressionNode {
    pub fn neg(x: ExpressionNode) -> Self {
        Self::Unary(UnaryOp::Neg, Box::new(x))
    }

    pub fn binaire(op: BinaryOp, a: ExpressionNode, b: ExpressionNode) -> Self {
        Self::Binary(op, Box::new(a), Box::new(b))
    }

    pub fn appel(nom: impl Into<String>, x: ExpressionNode) -> Self {
        Self::Call(nom.into(), Box::new(x))
    }

    pub fn factorielle(x: ExpressionNode) -> Self {
        Self::Factorial(Box::new(x))
    }

    /// Nombre de noeuds. Itératif (pas de récursion sur un arbre profond).
    pub fn taille(&self) -> usize {
        let mut pile: Vec<&ExpressionNode> = vec![self];
        let mut n = 0usize;

        while let Some(e) = pile.pop() {
            n += 1;
            match e {
                Self::Number(_) | Self::Constant(_) => {}
                Self::Unary(_, x) | Self::Call(_, x) | Self::Factorial(x) => pile.push(x),
                Self::Binary(_, a, b) => {
                    pile.push(a);
                    pile.push(b);
                }
            }
        }

        n
    }
}
