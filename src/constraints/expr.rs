//! Typed expression trees produced by the parser.

/// Built-in numeric functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Func {
    Abs,
    Sqrt,
    Exp,
    Ln,
    Sin,
    Cos,
    Tan,
    Min,
    Max,
    Pow,
}

impl Func {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "abs" => Self::Abs,
            "sqrt" => Self::Sqrt,
            "exp" => Self::Exp,
            "ln" | "log" => Self::Ln,
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "min" => Self::Min,
            "max" => Self::Max,
            "pow" => Self::Pow,
            _ => return None,
        })
    }

    /// Accepted argument counts as `(min, max)`; `None` means unbounded.
    pub(crate) fn arity(self) -> (usize, Option<usize>) {
        match self {
            Self::Abs | Self::Sqrt | Self::Exp | Self::Ln | Self::Sin | Self::Cos | Self::Tan => {
                (1, Some(1))
            }
            Self::Pow => (2, Some(2)),
            Self::Min | Self::Max => (2, None),
        }
    }

    fn apply(self, args: &[f64]) -> f64 {
        match self {
            Self::Abs => args[0].abs(),
            Self::Sqrt => args[0].sqrt(),
            Self::Exp => args[0].exp(),
            Self::Ln => args[0].ln(),
            Self::Sin => args[0].sin(),
            Self::Cos => args[0].cos(),
            Self::Tan => args[0].tan(),
            Self::Pow => args[0].powf(args[1]),
            Self::Min => args.iter().copied().fold(f64::INFINITY, f64::min),
            Self::Max => args.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl CmpOp {
    #[allow(clippy::float_cmp)]
    fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Lt => lhs < rhs,
            Self::Le => lhs <= rhs,
            Self::Gt => lhs > rhs,
            Self::Ge => lhs >= rhs,
            Self::Eq => lhs == rhs,
            Self::Ne => lhs != rhs,
        }
    }
}

/// An expression of numeric type.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum NumExpr {
    Const(f64),
    Var(usize),
    Neg(Box<NumExpr>),
    Binary(ArithOp, Box<NumExpr>, Box<NumExpr>),
    Call(Func, Vec<NumExpr>),
}

impl NumExpr {
    pub(crate) fn eval(&self, x: &[f64]) -> f64 {
        match self {
            Self::Const(v) => *v,
            Self::Var(i) => x[*i],
            Self::Neg(inner) => -inner.eval(x),
            Self::Binary(op, lhs, rhs) => {
                let (a, b) = (lhs.eval(x), rhs.eval(x));
                match op {
                    ArithOp::Add => a + b,
                    ArithOp::Sub => a - b,
                    ArithOp::Mul => a * b,
                    ArithOp::Div => a / b,
                    ArithOp::Pow => a.powf(b),
                }
            }
            Self::Call(func, args) => {
                let values: Vec<f64> = args.iter().map(|arg| arg.eval(x)).collect();
                func.apply(&values)
            }
        }
    }

    /// Largest variable index referenced, if any.
    pub(crate) fn max_var(&self) -> Option<usize> {
        match self {
            Self::Const(_) => None,
            Self::Var(i) => Some(*i),
            Self::Neg(inner) => inner.max_var(),
            Self::Binary(_, lhs, rhs) => lhs.max_var().max(rhs.max_var()),
            Self::Call(_, args) => args.iter().filter_map(Self::max_var).max(),
        }
    }
}

/// An expression of boolean type; every predicate compiles to one.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum BoolExpr {
    Const(bool),
    Compare(CmpOp, NumExpr, NumExpr),
    Not(Box<BoolExpr>),
    And(Box<BoolExpr>, Box<BoolExpr>),
    Or(Box<BoolExpr>, Box<BoolExpr>),
}

impl BoolExpr {
    /// Evaluates against `x`. A NaN operand makes every comparison except
    /// `!=` false.
    pub(crate) fn eval(&self, x: &[f64]) -> bool {
        match self {
            Self::Const(b) => *b,
            Self::Compare(op, lhs, rhs) => op.holds(lhs.eval(x), rhs.eval(x)),
            Self::Not(inner) => !inner.eval(x),
            Self::And(lhs, rhs) => lhs.eval(x) && rhs.eval(x),
            Self::Or(lhs, rhs) => lhs.eval(x) || rhs.eval(x),
        }
    }

    pub(crate) fn max_var(&self) -> Option<usize> {
        match self {
            Self::Const(_) => None,
            Self::Compare(_, lhs, rhs) => lhs.max_var().max(rhs.max_var()),
            Self::Not(inner) => inner.max_var(),
            Self::And(lhs, rhs) | Self::Or(lhs, rhs) => lhs.max_var().max(rhs.max_var()),
        }
    }
}
