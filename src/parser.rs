//! # parser.rs
//!
//! This module parses calculator expressions into an Abstract Syntax Tree (AST)
//! and evaluates that tree directly.
//!
//! It supports:
//! - Decimal literals (including scientific notation)
//! - Constants (`PI`, `E` and their aliases)
//! - Unary `+`/`-` and the binary operators `+ - * / % ^`
//! - Built-in functions (`sqrt`, `log`, `ln` and the trigonometric family)
//!
//! The parsing process converts a sequence of lexemes (from the lexer) into an `AstNode` tree
//! with the shunting-yard algorithm. The angle mode is resolved while parsing: in degree mode
//! the tree carries explicit [`AngleConversion`] nodes around trigonometric arguments and
//! inverse trigonometric results, so evaluation needs no ambient state.
//!
//! # Notes
//! - `^` is right-associative and binds tighter than a unary sign: `-2^2 == -4`.
//! - `* / %` bind tighter than `+ -`; all four are left-associative.
//! - Unary and binary operators sharing symbols (like "-" for negation and subtraction) are
//!   disambiguated based on context.

use crate::error::{CalcError, CalcResult};
use crate::lexer::Lexeme;
use crate::mode::AngleMode;
use phf::Map;
use phf_macros::phf_map;

/// Map of mathematical constants by their string representation.
static CONSTANTS: Map<&'static str, f64> = phf_map! {
    "PI" => std::f64::consts::PI,
    "pi" => std::f64::consts::PI,
    "π" => std::f64::consts::PI,
    "E" => std::f64::consts::E,
    "e" => std::f64::consts::E,
};

pub mod constant {
    use crate::parser::CONSTANTS;

    /// Returns a list of supported mathematical constant names.
    pub fn names() -> Vec<&'static str> {
        CONSTANTS.keys().cloned().collect()
    }

    /// Returns the value of the named constant.
    pub fn value(name: &str) -> Option<f64> {
        CONSTANTS.get(name).copied()
    }
}

/// Precedence of a prefix sign; between `* / %` and `^`.
const UNARY_PRECEDENCE: u8 = 2;

#[doc(hidden)]
/// Internal macro to define all unary operators.
///
/// This macro is **not intended for public use**.
/// It centralizes the enum variants, string representation, and apply logic for unary operators.
macro_rules! unary_operator_kind {
    ($($name:ident => { symbol: $symbol:expr, apply: $apply:expr }),* $(,)?) => {
        /// Represents a unary operator in a calculator expression.
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum UnaryOperatorKind {
            $($name),*
        }

        impl UnaryOperatorKind {
            /// Converts a string representation to a `UnaryOperatorKind`.
            pub fn from(s: &str) -> Option<Self> {
                $( if s == $symbol { return Some(Self::$name); } )*
                None
            }

            /// Applies the unary operator to a number.
            pub fn apply(&self, x: f64) -> f64 {
                match self {
                    $( Self::$name => $apply(x), )*
                }
            }

            /// Returns a list of all supported unary operator symbols.
            pub fn names() -> Vec<&'static str> {
                vec![$($symbol),*]
            }
        }

        impl std::fmt::Display for UnaryOperatorKind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let s = match self {
                    $( Self::$name => $symbol, )*
                };
                write!(f, "{}", s)
            }
        }
    };
}

unary_operator_kind! {
    Positive => { symbol: "+", apply: |x: f64| x },
    Negative => { symbol: "-", apply: |x: f64| -x },
}

/// Information about a binary operator in a calculator expression.
///
/// Contains the operator's precedence and associativity, which are used
/// when parsing expressions to determine the order of operations.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperatorInfo {
    /// Operator precedence (higher value means higher precedence).
    pub precedence: u8,

    /// Whether the operator is left-associative.
    pub is_left_assoc: bool,
}

/// Divides `l` by `r`, rejecting a zero divisor.
fn checked_div(l: f64, r: f64) -> CalcResult<f64> {
    if r == 0.0 {
        return Err(CalcError::expression(format!("Division by zero in {} / {}", l, r)));
    }
    Ok(l / r)
}

/// Remainder of `l / r` with the sign of `l`, rejecting a zero divisor.
fn checked_rem(l: f64, r: f64) -> CalcResult<f64> {
    if r == 0.0 {
        return Err(CalcError::expression(format!("Modulo by zero in {} % {}", l, r)));
    }
    Ok(l % r)
}

#[doc(hidden)]
/// Internal macro to define all binary operators.
///
/// This macro is **not intended for public use**.
/// It centralizes the enum variants, string representation, precedence, associativity, and apply logic.
macro_rules! binary_operators {
    ($($name:ident => {
        symbol: $symbol:expr,
        precedence: $prec:expr,
        left_assoc: $assoc:expr,
        apply: $apply:expr
    }),* $(,)?) => {
        /// Represents a binary operator in a calculator expression.
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum BinaryOperatorKind {
            $($name),*
        }

        impl BinaryOperatorKind {
            /// Returns operator precedence and associativity.
            pub fn info(&self) -> BinaryOperatorInfo {
                match self {
                    $(Self::$name => BinaryOperatorInfo { precedence: $prec, is_left_assoc: $assoc },)*
                }
            }

            /// Converts a string to the corresponding operator.
            pub fn from(s: &str) -> Option<Self> {
                $( if s == $symbol { return Some(Self::$name); } )*
                None
            }

            /// Applies the operator to two numbers.
            pub fn apply(&self, l: f64, r: f64) -> CalcResult<f64> {
                match self {
                    $(Self::$name => $apply(l, r),)*
                }
            }

            /// Returns a list of all supported binary operator symbols.
            pub fn names() -> Vec<&'static str> {
                vec![$($symbol),*]
            }
        }

        impl std::fmt::Display for BinaryOperatorKind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let s = match self {
                    $(Self::$name => $symbol,)*
                };
                write!(f, "{}", s)
            }
        }
    };
}

binary_operators! {
    Add => { symbol: "+", precedence: 0, left_assoc: true,  apply: |l: f64, r: f64| Ok(l + r) },
    Sub => { symbol: "-", precedence: 0, left_assoc: true,  apply: |l: f64, r: f64| Ok(l - r) },
    Mul => { symbol: "*", precedence: 1, left_assoc: true,  apply: |l: f64, r: f64| Ok(l * r) },
    Div => { symbol: "/", precedence: 1, left_assoc: true,  apply: checked_div },
    Rem => { symbol: "%", precedence: 1, left_assoc: true,  apply: checked_rem },
    Pow => { symbol: "^", precedence: 3, left_assoc: false, apply: |l: f64, r: f64| Ok(l.powf(r)) },
}

/// Where a function meets the angle unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUse {
    /// The function does not deal with angles.
    None,
    /// The argument is an angle (`sin`, `cos`, `tan`).
    Argument,
    /// The result is an angle (`asin`, `acos`, `atan`).
    Result,
}

#[doc(hidden)]
/// Internal macro for defining built-in functions.
///
/// This macro is **not intended for public use**.
/// It generates the [`FunctionKind`] enum and its implementations (`from`, `angle_use`,
/// `apply`, and `Display`). Every built-in takes exactly one argument.
macro_rules! functions {
    ($( $variant: ident => {
        name: $name:expr,
        angle: $angle:expr,
        apply: $apply:expr
    }, )*) => {
        /// Represents a built-in function of the calculator.
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum FunctionKind {
            $( $variant, )*
        }

        impl FunctionKind {
            /// Converts a string representation of a function into a `FunctionKind`.
            ///
            /// Returns `None` if the string does not match any supported function.
            pub fn from(s: &str) -> Option<Self> {
                $( if s == $name { return Some(Self::$variant); } )*
                None
            }

            /// Returns a list of all supported function names.
            pub fn names() -> Vec<&'static str> {
                vec![$($name),*]
            }

            /// Returns how the function relates to the angle unit.
            pub fn angle_use(&self) -> AngleUse {
                match self {
                    $( Self::$variant => $angle, )*
                }
            }

            /// Applies the function to an argument (angles in radians).
            pub fn apply(&self, x: f64) -> f64 {
                match self {
                    $( Self::$variant => $apply(x), )*
                }
            }
        }

        impl std::fmt::Display for FunctionKind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let s = match self {
                    $( Self::$variant => $name, )*
                };
                write!(f, "{}", s)
            }
        }
    };
}

functions! {
    Sqrt    => { name: "sqrt",  angle: AngleUse::None,      apply: f64::sqrt },
    Log     => { name: "log",   angle: AngleUse::None,      apply: f64::log10 },
    Ln      => { name: "ln",    angle: AngleUse::None,      apply: f64::ln },
    Sin     => { name: "sin",   angle: AngleUse::Argument,  apply: f64::sin },
    Cos     => { name: "cos",   angle: AngleUse::Argument,  apply: f64::cos },
    Tan     => { name: "tan",   angle: AngleUse::Argument,  apply: f64::tan },
    Asin    => { name: "asin",  angle: AngleUse::Result,    apply: f64::asin },
    Acos    => { name: "acos",  angle: AngleUse::Result,    apply: f64::acos },
    Atan    => { name: "atan",  angle: AngleUse::Result,    apply: f64::atan },
}

impl FunctionKind {
    /// Returns true if the call converts its argument from degrees under `angle`.
    pub fn is_degree_converted(&self, angle: AngleMode) -> bool {
        angle == AngleMode::Degrees && self.angle_use() == AngleUse::Argument
    }
}

/// Explicit unit conversion inserted around trigonometric calls in degree mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleConversion {
    DegreesToRadians,
    RadiansToDegrees,
}

impl AngleConversion {
    /// Applies the conversion.
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Self::DegreesToRadians => AngleMode::Degrees.to_radians(x),
            Self::RadiansToDegrees => AngleMode::Degrees.from_radians(x),
        }
    }
}

impl std::fmt::Display for AngleConversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DegreesToRadians => write!(f, "deg2rad"),
            Self::RadiansToDegrees => write!(f, "rad2deg"),
        }
    }
}

/// Represents a parsed token in a calculator expression.
///
/// Tokens are produced from lexemes and consumed by the parser to build an AST.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numerical value token: a literal or a resolved constant.
    Number(f64),

    /// Generic operator token holding the original lexeme.
    Operator(Lexeme),

    /// Unary operator token (e.g., `+`, `-`).
    UnaryOperator(UnaryOperatorKind),

    /// Binary operator token (e.g., `+`, `-`, `*`, `/`, `%`, `^`).
    BinaryOperator(BinaryOperatorKind),

    /// Built-in function token (e.g., `sin`, `sqrt`).
    Function(FunctionKind),

    /// Left parenthesis `'('`.
    LParen(Lexeme),

    /// Right parenthesis `')'`.
    RParen(Lexeme),
}

impl Token {
    /// Attempts to parse a lexeme as a decimal literal.
    ///
    /// Only lexemes starting like a number are considered, so identifiers such
    /// as `inf` or `NaN` never become numbers.
    fn parse_real(s: &str) -> Option<f64> {
        if !s.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
            return None;
        }
        s.parse::<f64>().ok()
    }

    /// Converts a lexeme into a corresponding `Token`.
    ///
    /// Returns an error if the lexeme cannot be recognized.
    pub fn from(lexeme: &Lexeme) -> CalcResult<Self> {
        let text = lexeme.text();

        if let Some(val) = Self::parse_real(text)
            .or_else(|| CONSTANTS.get(text).copied())
        {
            return Ok(Token::Number(val));
        }

        /* We can't know whether the text is unary operator or binary operator
         * because some operator's strings are the same.
         * So we register only its lexeme. */
        if UnaryOperatorKind::from(text).is_some() || BinaryOperatorKind::from(text).is_some() {
            return Ok(Token::Operator(lexeme.clone()));
        }

        if let Some(func_kind) = FunctionKind::from(text) {
            return Ok(Token::Function(func_kind));
        }

        match text {
            "(" => Ok(Token::LParen(lexeme.clone())),
            ")" => Ok(Token::RParen(lexeme.clone())),
            _ => Err(CalcError::expression(format!("Unknown string {}", lexeme))),
        }
    }
}

/// Appends the closing parentheses left out after degree-converted calls.
///
/// Only applies in degree mode. The number of `)` appended is the smaller of
/// the number of degree-converted calls (`sin`, `cos`, `tan`) and the
/// aggregate surplus of `(` over `)`. Only the totals are compared, so a
/// call left open in the middle of the input is closed at the very end:
/// `sin(30 + cos(60` becomes `sin(30 + cos(60))`.
///
/// Nothing is ever removed: a surplus `)` such as in `sin(30))` stays and
/// the parser rejects it as unmatched. An already balanced `sin(30)` is
/// left untouched.
///
/// Returns the number of parentheses appended.
pub fn balance_parentheses(lexemes: &mut Vec<Lexeme>, angle: AngleMode) -> usize {
    let degree_calls = lexemes.iter()
        .filter_map(|l| FunctionKind::from(l.text()))
        .filter(|f| f.is_degree_converted(angle))
        .count();
    if degree_calls == 0 {
        return 0;
    }

    let opens = lexemes.iter().filter(|l| l.text() == "(").count();
    let closes = lexemes.iter().filter(|l| l.text() == ")").count();
    let missing = degree_calls.min(opens.saturating_sub(closes));

    let end = lexemes.last().map_or(0, |l| l.end());
    for _ in 0..missing {
        lexemes.push(Lexeme::new(")", end..end));
    }
    missing
}

/// Deepest tree [`AstNode::from`] builds; a leaf counts as depth 1.
///
/// Evaluation and formatting walk the tree recursively, so input nested
/// past this is rejected instead of exhausting the stack.
pub const MAX_DEPTH: usize = 512;

/// Operand stack of the shunting-yard parser: each node with its depth.
type Operands = Vec<(AstNode, usize)>;

/// Abstract Syntax Tree (AST) node representing a calculator expression.
///
/// Each node corresponds to a part of an expression:
/// - numeric values,
/// - unary/binary operators,
/// - function calls,
/// - explicit angle conversions.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal.
    Number(f64),

    /// Unary operator applied to an expression.
    UnaryOperator {
        kind: UnaryOperatorKind,
        expr: Box<AstNode>,
    },

    /// Binary operator applied to left and right expressions.
    BinaryOperator {
        kind: BinaryOperatorKind,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },

    /// Function call with its argument expression.
    FunctionCall {
        kind: FunctionKind,
        arg: Box<AstNode>,
    },

    /// Angle unit conversion of an expression.
    AngleConversion {
        kind: AngleConversion,
        expr: Box<AstNode>,
    },
}

/// AstNode impl `from` and its helper impls
impl AstNode {
    /// Parses a slice of lexemes into an AST node.
    ///
    /// Implements a shunting-yard parser handling numbers, unary/binary operators,
    /// function calls and parentheses. `angle` decides whether trigonometric
    /// calls are wrapped in [`AngleConversion`] nodes.
    ///
    /// # Returns
    /// - `Ok(AstNode)` representing the root of the parsed AST.
    /// - `Err(CalcError::InvalidExpression)` if parsing fails due to invalid syntax or unknown tokens.
    pub fn from(lexemes: &[Lexeme], angle: AngleMode) -> CalcResult<Self> {
        let mut ast_nodes: Operands = Vec::new();
        let mut token_stack: Vec<Token> = Vec::new();
        // record whether the previous token is finished by value or not to evaluate the token is unary operator or binary operator.
        let mut prev_is_value = false;
        let mut lexemes = lexemes.iter().peekable();

        while let Some(lexeme) = lexemes.next() {
            let token = Token::from(lexeme)?;
            match token {
                Token::Number(val) => {
                    Self::expect_operator_absent(prev_is_value, lexeme)?;
                    ast_nodes.push((Self::Number(val), 1));
                    prev_is_value = true;
                },
                Token::Operator(lexeme) => {
                    match prev_is_value {
                        true => Self::parse_in_binary_operator(&mut ast_nodes, &mut token_stack, &lexeme)?,
                        false => Self::parse_in_unary_operator(&mut token_stack, &lexeme)?,
                    };
                    prev_is_value = false;
                },
                Token::Function(_) => {
                    Self::expect_operator_absent(prev_is_value, lexeme)?;
                    if lexemes.peek().map(|l| l.text()) != Some("(") {
                        return Err(CalcError::expression(format!("Function {} must be followed by '('", lexeme)));
                    }
                    token_stack.push(token);
                    prev_is_value = false;
                },
                Token::LParen(_) => {
                    Self::expect_operator_absent(prev_is_value, lexeme)?;
                    token_stack.push(token);
                    prev_is_value = false; // The operator next to LParen is unary operator; ex) cos(-x), 3 * (-2)
                },
                Token::RParen(_) => {
                    if !prev_is_value {
                        return Err(CalcError::expression(format!("Missing operand before {}", lexeme)));
                    }
                    Self::parse_in_right_paren(&mut ast_nodes, &mut token_stack, lexeme, angle)?;
                    prev_is_value = true; // The operator next to RParen is binary operator; ex) sin(x) + 2, (x+2)/(x-3)
                },
                _ => return Err(CalcError::expression(format!("Invalid token kind made from {}", lexeme))),
            }
        }

        while let Some(token) = token_stack.pop() {
            match token {
                Token::UnaryOperator(oper) => Self::from_unary(&mut ast_nodes, oper)?,
                Token::BinaryOperator(oper) => Self::from_binary(&mut ast_nodes, oper)?,
                Token::LParen(lexeme) => {
                    return Err(CalcError::expression(format!("Missing closing parenthesis for {}", lexeme)));
                },
                _ => return Err(CalcError::expression("Unexpected token at the end")),
            }
        }

        let (ret, _) = ast_nodes.pop()
            .ok_or_else(|| CalcError::expression("Nothing to evaluate"))?;

        if !ast_nodes.is_empty() {
            return Err(CalcError::expression("Too many values without operators between them"));
        }
        Ok(ret)
    }

    /// Rejects a value that directly follows another value, as in `2 3` or `2(3)`.
    fn expect_operator_absent(prev_is_value: bool, lexeme: &Lexeme) -> CalcResult<()> {
        if prev_is_value {
            return Err(CalcError::expression(format!("Missing operator before {}", lexeme)));
        }
        Ok(())
    }

    /// Parses tokens in a subexpression until a left parenthesis `(` is encountered.
    ///
    /// Pops tokens from `token_stack` and constructs AST nodes into `ast_nodes`.
    /// If a function sits directly below the parenthesis, the call node is built too.
    fn parse_in_right_paren(
        ast_nodes: &mut Operands,
        token_stack: &mut Vec<Token>,
        lexeme: &Lexeme,
        angle: AngleMode,
    ) -> CalcResult<()> {
        loop {
            match token_stack.pop() {
                Some(Token::LParen(_)) => break,
                Some(Token::UnaryOperator(oper)) => Self::from_unary(ast_nodes, oper)?,
                Some(Token::BinaryOperator(oper)) => Self::from_binary(ast_nodes, oper)?,
                Some(_) => {
                    return Err(CalcError::expression(format!(
                        "Unexpected token in stack when parsing in RParen at {s}..{e}",
                        s=lexeme.start(), e=lexeme.end(),
                    )))
                },
                None => {
                    return Err(CalcError::expression(format!("Unmatched closing parenthesis {}", lexeme)))
                },
            }
        }

        if let Some(Token::Function(func)) = token_stack.last() {
            let func = *func;
            token_stack.pop();
            Self::from_function(ast_nodes, func, angle)?;
        }
        Ok(())
    }

    /// Parses a unary operator token and pushes it onto the token stack.
    fn parse_in_unary_operator(
        token_stack: &mut Vec<Token>,
        lexeme: &Lexeme,
    ) -> CalcResult<()> {
        if let Some(oper_kind) = UnaryOperatorKind::from(lexeme.text()) {
            token_stack.push(Token::UnaryOperator(oper_kind));
            Ok(())
        } else {
            Err(CalcError::expression(format!("Unknown unary operator {}", lexeme)))
        }
    }

    /// Returns the precedence of an operator token on the stack, if it is one.
    fn stacked_precedence(token: &Token) -> Option<u8> {
        match token {
            Token::BinaryOperator(kind) => Some(kind.info().precedence),
            Token::UnaryOperator(_) => Some(UNARY_PRECEDENCE),
            _ => None,
        }
    }

    /// Parses a binary operator token, resolves operator precedence, and pushes it onto the token stack.
    ///
    /// Implements the shunting-yard precedence rules for left- and right-associative operators.
    /// Stacked unary signs take part with their own precedence.
    fn parse_in_binary_operator(
        ast_nodes: &mut Operands,
        token_stack: &mut Vec<Token>,
        lexeme: &Lexeme,
    ) -> CalcResult<()> {
        let oper_kind = BinaryOperatorKind::from(lexeme.text())
            .ok_or_else(|| CalcError::expression(format!("Unknown binary operator {}", lexeme)))?;
        let oper_info = oper_kind.info();

        while let Some(top_precedence) = token_stack.last().and_then(Self::stacked_precedence) {
            let pops = if oper_info.is_left_assoc {
                top_precedence >= oper_info.precedence
            } else {
                top_precedence > oper_info.precedence
            };
            if !pops {
                break;
            }
            match token_stack.pop() {
                Some(Token::BinaryOperator(top_oper)) => Self::from_binary(ast_nodes, top_oper)?,
                Some(Token::UnaryOperator(top_oper)) => Self::from_unary(ast_nodes, top_oper)?,
                _ => return Err(CalcError::expression(format!("Broken operator stack at {}", lexeme))),
            }
        }
        token_stack.push(Token::BinaryOperator(oper_kind));
        Ok(())
    }

    /// Returns `depth` if a node that deep is still allowed.
    fn checked_depth(depth: usize) -> CalcResult<usize> {
        if depth > MAX_DEPTH {
            return Err(CalcError::expression(format!(
                "Expression nested too deeply (more than {} levels)", MAX_DEPTH,
            )));
        }
        Ok(depth)
    }

    /// Internal helper to create a unary operator AST node from a stack.
    fn from_unary(
        stack: &mut Operands,
        oper: UnaryOperatorKind,
    ) -> CalcResult<()> {
        let (expr, depth) = stack.pop()
            .ok_or_else(|| CalcError::expression(format!("Missing operand for unary {}", oper)))?;
        let depth = Self::checked_depth(depth + 1)?;
        stack.push((Self::UnaryOperator { kind: oper, expr: Box::new(expr) }, depth));
        Ok(())
    }

    /// Internal helper to create a binary operator AST node from a stack.
    ///
    /// The right-hand operand is expected at the top of the stack, followed by the left-hand operand.
    fn from_binary(
        stack: &mut Operands,
        oper: BinaryOperatorKind,
    ) -> CalcResult<()> {
        let (right, right_depth) = stack.pop()
            .ok_or_else(|| CalcError::expression(format!("Missing right operand for {}", oper)))?;
        let (left, left_depth) = stack.pop()
            .ok_or_else(|| CalcError::expression(format!("Missing left operand for {}", oper)))?;
        let depth = Self::checked_depth(left_depth.max(right_depth) + 1)?;
        stack.push((Self::BinaryOperator {
            kind: oper,
            left: Box::new(left),
            right: Box::new(right),
        }, depth));
        Ok(())
    }

    /// Internal helper to create a function call AST node from a stack.
    ///
    /// In degree mode, `sin`/`cos`/`tan` get their argument wrapped in a
    /// degrees-to-radians conversion and `asin`/`acos`/`atan` get their
    /// result wrapped in a radians-to-degrees conversion.
    fn from_function(
        stack: &mut Operands,
        func: FunctionKind,
        angle: AngleMode,
    ) -> CalcResult<()> {
        let (arg, depth) = stack.pop()
            .ok_or_else(|| CalcError::expression(format!("Missing function argument for {}", func)))?;

        let converted = angle == AngleMode::Degrees && func.angle_use() != AngleUse::None;
        let depth = Self::checked_depth(depth + if converted { 2 } else { 1 })?;
        let node = match (angle, func.angle_use()) {
            (AngleMode::Degrees, AngleUse::Argument) => Self::FunctionCall {
                kind: func,
                arg: Box::new(Self::AngleConversion {
                    kind: AngleConversion::DegreesToRadians,
                    expr: Box::new(arg),
                }),
            },
            (AngleMode::Degrees, AngleUse::Result) => Self::AngleConversion {
                kind: AngleConversion::RadiansToDegrees,
                expr: Box::new(Self::FunctionCall { kind: func, arg: Box::new(arg) }),
            },
            _ => Self::FunctionCall { kind: func, arg: Box::new(arg) },
        };
        stack.push((node, depth));
        Ok(())
    }
}

/// AstNode impl `evaluate`
impl AstNode {
    /// Evaluates the tree.
    ///
    /// Fails only where an operator rejects its operands (division or modulo
    /// by zero). Other non-finite values, such as `sqrt(-1)`, are returned
    /// as they are and left to the caller.
    pub fn evaluate(&self) -> CalcResult<f64> {
        match self {
            Self::Number(val) => Ok(*val),
            Self::UnaryOperator { kind, expr } => Ok(kind.apply(expr.evaluate()?)),
            Self::BinaryOperator { kind, left, right } => {
                kind.apply(left.evaluate()?, right.evaluate()?)
            },
            Self::FunctionCall { kind, arg } => Ok(kind.apply(arg.evaluate()?)),
            Self::AngleConversion { kind, expr } => Ok(kind.apply(expr.evaluate()?)),
        }
    }
}

impl std::fmt::Display for AstNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(val) => write!(f, "{}", val),
            Self::UnaryOperator { kind, expr } => write!(f, "({}{})", kind, expr),
            Self::BinaryOperator { kind, left, right } => write!(f, "({} {} {})", left, kind, right),
            Self::FunctionCall { kind, arg } => write!(f, "{}({})", kind, arg),
            Self::AngleConversion { kind, expr } => write!(f, "{}({})", kind, expr),
        }
    }
}

#[cfg(test)]
mod unary_operator_kind_tests {
    use super::*;

    #[test]
    fn test_unary_operator_kind_from() {
        assert_eq!(UnaryOperatorKind::from("+"), Some(UnaryOperatorKind::Positive));
        assert_eq!(UnaryOperatorKind::from("-"), Some(UnaryOperatorKind::Negative));
        assert_eq!(UnaryOperatorKind::from("*"), None);
        assert_eq!(UnaryOperatorKind::from(""), None);
    }

    #[test]
    fn test_unary_operator_kind_apply() {
        assert_eq!(UnaryOperatorKind::Positive.apply(2.5), 2.5);
        assert_eq!(UnaryOperatorKind::Negative.apply(2.5), -2.5);
    }
}


#[cfg(test)]
mod function_kind_tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_function_kind_from() {
        assert_eq!(FunctionKind::from("sqrt"), Some(FunctionKind::Sqrt));
        assert_eq!(FunctionKind::from("log"), Some(FunctionKind::Log));
        assert_eq!(FunctionKind::from("ln"), Some(FunctionKind::Ln));
        assert_eq!(FunctionKind::from("asin"), Some(FunctionKind::Asin));
        assert_eq!(FunctionKind::from("sinh"), None);
        assert_eq!(FunctionKind::names().len(), 9);
    }

    #[test]
    fn test_angle_use() {
        assert_eq!(FunctionKind::Sin.angle_use(), AngleUse::Argument);
        assert_eq!(FunctionKind::Atan.angle_use(), AngleUse::Result);
        assert_eq!(FunctionKind::Ln.angle_use(), AngleUse::None);
        assert!(FunctionKind::Tan.is_degree_converted(AngleMode::Degrees));
        assert!(!FunctionKind::Tan.is_degree_converted(AngleMode::Radians));
        assert!(!FunctionKind::Acos.is_degree_converted(AngleMode::Degrees));
    }

    #[test]
    fn test_apply() {
        assert_eq!(FunctionKind::Sqrt.apply(16.0), 4.0);
        assert_abs_diff_eq!(FunctionKind::Log.apply(1000.0), 3.0, epsilon = 1.0e-12);
        assert_eq!(FunctionKind::Ln.apply(1.0), 0.0);
    }
}
