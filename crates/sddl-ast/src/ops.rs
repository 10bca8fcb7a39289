use serde::Serialize;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, strum::Display)]
pub enum UnOp {
    #[strum(to_string = "!")]
    Not,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, strum::Display)]
pub enum BinOp {
    #[strum(to_string = "+")]
    Add,
    #[strum(to_string = "-")]
    Sub,
    #[strum(to_string = "*")]
    Mul,
    #[strum(to_string = "/")]
    Div,
    #[strum(to_string = "%")]
    Mod,
    #[strum(to_string = "^")]
    Pow,
    #[strum(to_string = "..")]
    Concat,
    #[strum(to_string = "==")]
    Eq,
    #[strum(to_string = "!=")]
    Ne,
    #[strum(to_string = "<")]
    Lt,
    #[strum(to_string = "<=")]
    Le,
    #[strum(to_string = ">")]
    Gt,
    #[strum(to_string = ">=")]
    Ge,
    #[strum(to_string = "and")]
    And,
    #[strum(to_string = "or")]
    Or,
}
