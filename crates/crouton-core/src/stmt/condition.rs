use super::{BinaryOp, Type, Value};

use std::fmt;

/// A compiled predicate.
///
/// Closed over the statement's parameters: every member names the parameter
/// it reads from and the physical column it reads. Conditions carry no
/// references to live objects and are evaluated by [`Condition::eval`] over
/// rows, or rendered to SQL by the serializer.
#[derive(Clone, PartialEq)]
pub enum Condition {
    /// Binary operation
    Binary(CondBinary),

    /// Function call
    Call(CondCall),

    /// Constant value
    Constant(Value),

    /// Column of a parameter
    Member(CondMember),

    /// A parameter compared as a whole, i.e. by its primary key
    Parameter(CondParameter),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CondBinary {
    pub op: BinaryOp,
    pub lhs: Box<Condition>,
    pub rhs: Box<Condition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CondCall {
    pub kind: CallKind,
    pub args: Vec<Condition>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CallKind {
    /// `Contains(list, item)`: set membership
    Contains,

    /// Converts its single argument to the given type
    Convert(Type),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CondMember {
    /// Parameter the column belongs to
    pub param: String,

    /// Column name
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CondParameter {
    pub param: String,

    /// Primary key column of the parameter's type
    pub key: String,
}

impl Condition {
    pub fn binary(op: BinaryOp, lhs: impl Into<Condition>, rhs: impl Into<Condition>) -> Self {
        CondBinary {
            op,
            lhs: Box::new(lhs.into()),
            rhs: Box::new(rhs.into()),
        }
        .into()
    }

    pub fn eq(lhs: impl Into<Condition>, rhs: impl Into<Condition>) -> Self {
        Condition::binary(BinaryOp::Eq, lhs, rhs)
    }

    pub fn and(lhs: impl Into<Condition>, rhs: impl Into<Condition>) -> Self {
        Condition::binary(BinaryOp::And, lhs, rhs)
    }

    pub fn member(param: impl Into<String>, path: impl Into<String>) -> Self {
        CondMember {
            param: param.into(),
            path: path.into(),
        }
        .into()
    }

    pub fn convert(ty: Type, arg: impl Into<Condition>) -> Self {
        CondCall {
            kind: CallKind::Convert(ty),
            args: vec![arg.into()],
        }
        .into()
    }

    pub fn contains(list: impl Into<Condition>, item: impl Into<Condition>) -> Self {
        CondCall {
            kind: CallKind::Contains,
            args: vec![list.into(), item.into()],
        }
        .into()
    }

    /// The column this operand reads, looking through conversions.
    ///
    /// A whole parameter reads its primary key column.
    pub fn column(&self) -> Option<(&str, &str)> {
        match self {
            Self::Member(member) => Some((&member.param, &member.path)),
            Self::Parameter(parameter) => Some((&parameter.param, &parameter.key)),
            Self::Call(CondCall {
                kind: CallKind::Convert(_),
                args,
            }) => args.first()?.column(),
            _ => None,
        }
    }

    /// Name of the parameter this operand is rooted at, if it reads a column.
    pub fn root(&self) -> Option<&str> {
        self.column().map(|(param, _)| param)
    }

    /// Visits this condition and its conjuncts, depth first, left to right.
    ///
    /// Disjunctions are not entered.
    pub fn conjuncts(&self) -> Vec<&Condition> {
        let mut out = vec![];
        let mut pending = vec![self];

        while let Some(condition) = pending.pop() {
            match condition {
                Self::Binary(binary) if binary.op == BinaryOp::And => {
                    pending.push(&binary.rhs);
                    pending.push(&binary.lhs);
                }
                condition => out.push(condition),
            }
        }

        out
    }

    /// Every parameter the condition reads from, in first-seen order.
    pub fn params(&self) -> Vec<&str> {
        let mut out: Vec<&str> = vec![];
        self.visit(&mut |condition| {
            if let Some(param) = condition.root() {
                if !out.contains(&param) {
                    out.push(param);
                }
            }
        });
        out
    }

    fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Condition)) {
        f(self);

        match self {
            Self::Binary(binary) => {
                binary.lhs.visit(f);
                binary.rhs.visit(f);
            }
            Self::Call(call) => {
                for arg in &call.args {
                    arg.visit(f);
                }
            }
            _ => {}
        }
    }
}

impl From<CondBinary> for Condition {
    fn from(value: CondBinary) -> Self {
        Self::Binary(value)
    }
}

impl From<CondCall> for Condition {
    fn from(value: CondCall) -> Self {
        Self::Call(value)
    }
}

impl From<CondMember> for Condition {
    fn from(value: CondMember) -> Self {
        Self::Member(value)
    }
}

impl From<CondParameter> for Condition {
    fn from(value: CondParameter) -> Self {
        Self::Parameter(value)
    }
}

impl From<Value> for Condition {
    fn from(value: Value) -> Self {
        Self::Constant(value)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary(binary) => write!(f, "({:?} {} {:?})", binary.lhs, binary.op, binary.rhs),
            Self::Call(call) => {
                match call.kind {
                    CallKind::Contains => write!(f, "contains(")?,
                    CallKind::Convert(ty) => write!(f, "convert<{ty}>(")?,
                }
                for (i, arg) in call.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg:?}")?;
                }
                write!(f, ")")
            }
            Self::Constant(value) => write!(f, "{value:?}"),
            Self::Member(member) => write!(f, "{}.{}", member.param, member.path),
            Self::Parameter(parameter) => write!(f, "{}", parameter.param),
        }
    }
}
