//! Assembly parser
//!
//! Each source line is lexed and parsed independently into an optional
//! label and an optional [`Item`]. Address operands that name a label are
//! left unresolved for the assembler's second pass.

use logos::Logos;
use std::ops::Range;

use crate::error::{AssemblerError, Result};
use crate::lexer::Token;
use toycpu_spec::encoding::{ADDR23_MASK, ADDR25_MASK, ADDR27_MASK};
use toycpu_spec::value::CHAR_MAX;
use toycpu_spec::{Instruction, Opcode, OperandLayout, Register, TypedValue};

/// Address operand before label resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressRef {
    Absolute(u32),
    Label(String),
}

/// Contents of one source line (after an optional label)
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// An instruction; `target` is set when its address names a label
    Instruction {
        inst: Instruction,
        target: Option<String>,
    },
    /// A `.word` data word
    Word(u32),
}

/// A parsed source line
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub label: Option<String>,
    pub item: Option<Item>,
}

/// Parse a single instruction from assembly text.
///
/// Label operands are rejected since there is nothing to resolve them against.
pub fn parse_instruction(text: &str) -> Result<Instruction> {
    match parse_line(text, 0)?.item {
        Some(Item::Instruction { inst, target: None }) => Ok(inst),
        Some(Item::Instruction {
            target: Some(label),
            ..
        }) => Err(AssemblerError::UndefinedLabel { label, line: 0 }),
        _ => Err(AssemblerError::SyntaxError {
            line: 0,
            column: 0,
            message: "Expected an instruction".to_string(),
        }),
    }
}

/// Parse register name (`R0`-`R3`, case-insensitive)
pub fn parse_register(name: &str) -> Result<Register> {
    let name = name.trim();
    let index = name
        .strip_prefix('R')
        .or_else(|| name.strip_prefix('r'))
        .and_then(|digits| digits.parse::<usize>().ok());

    index
        .and_then(Register::from_index)
        .ok_or_else(|| AssemblerError::InvalidRegister(name.to_string()))
}

fn looks_like_register(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some('r' | 'R'))
        && chars.clone().next().is_some()
        && chars.all(|c| c.is_ascii_digit())
}

/// Parse one line of source. `line_no` is 1-based and only used in errors.
pub fn parse_line(text: &str, line_no: usize) -> Result<Line> {
    let mut tokens = Vec::new();
    let mut lex = Token::lexer(text);
    while let Some(tok) = lex.next() {
        match tok {
            Ok(tok) => tokens.push((tok, lex.span())),
            Err(()) => {
                return Err(AssemblerError::SyntaxError {
                    line: line_no,
                    column: lex.span().start + 1,
                    message: format!("Unexpected input '{}'", lex.slice()),
                })
            }
        }
    }

    let mut cursor = Cursor {
        tokens,
        pos: 0,
        line: line_no,
        len: text.len(),
    };
    let mut line = Line::default();

    // label:
    if let (Some(Token::Identifier(name)), Some(Token::Colon)) = (cursor.peek(), cursor.peek_at(1)) {
        if Opcode::from_mnemonic(name).is_some() || looks_like_register(name) {
            return Err(cursor.error(format!("Reserved name used as label: {}", name)));
        }
        line.label = Some(name.clone());
        cursor.pos += 2;
    }

    line.item = match cursor.next() {
        None => None,
        Some(Token::Directive(name)) if name.eq_ignore_ascii_case("word") => {
            Some(Item::Word(parse_word_literal(&mut cursor)?))
        }
        Some(Token::Directive(name)) => {
            return Err(AssemblerError::InvalidDirective(name));
        }
        Some(Token::Identifier(mnemonic)) => {
            let opcode = Opcode::from_mnemonic(&mnemonic)
                .ok_or(AssemblerError::UnknownInstruction(mnemonic))?;
            let (inst, target) = parse_operands(opcode, &mut cursor)?;
            Some(Item::Instruction { inst, target })
        }
        Some(other) => {
            return Err(cursor.error_prev(format!("Unexpected token {:?}", other)));
        }
    };

    if let Some(tok) = cursor.peek() {
        let tok = tok.clone();
        return Err(cursor.error(format!("Unexpected trailing token {:?}", tok)));
    }

    Ok(line)
}

struct Cursor {
    tokens: Vec<(Token, Range<usize>)>,
    pos: usize,
    line: usize,
    len: usize,
}

impl Cursor {
    fn peek(&self) -> Option<&Token> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset).map(|(t, _)| t)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).map(|(t, _)| t.clone());
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn column_at(&self, pos: usize) -> usize {
        self.tokens
            .get(pos)
            .map(|(_, span)| span.start + 1)
            .unwrap_or(self.len + 1)
    }

    fn error(&self, message: String) -> AssemblerError {
        AssemblerError::SyntaxError {
            line: self.line,
            column: self.column_at(self.pos),
            message,
        }
    }

    fn error_prev(&self, message: String) -> AssemblerError {
        AssemblerError::SyntaxError {
            line: self.line,
            column: self.column_at(self.pos.saturating_sub(1)),
            message,
        }
    }

    fn expect(&mut self, want: Token, what: &str) -> Result<()> {
        match self.next() {
            Some(tok) if tok == want => Ok(()),
            _ => Err(self.error_prev(format!("Expected {}", what))),
        }
    }

    fn register(&mut self) -> Result<Register> {
        match self.next() {
            Some(Token::Identifier(name)) => parse_register(&name),
            _ => Err(self.error_prev("Expected register operand".to_string())),
        }
    }

    fn comma(&mut self) -> Result<()> {
        self.expect(Token::Comma, "','")
    }

    /// `[addr]`, `[label]`, or the same without brackets
    fn address(&mut self, mask: u32) -> Result<AddressRef> {
        let bracketed = self.peek() == Some(&Token::LBracket);
        if bracketed {
            self.pos += 1;
        }

        let addr = match self.next() {
            Some(Token::Number(n)) => self.absolute(n as i128, mask)?,
            Some(Token::Hex(n)) | Some(Token::Binary(n)) => self.absolute(n as i128, mask)?,
            Some(Token::Identifier(name)) if looks_like_register(&name) => {
                return Err(self.error_prev(format!(
                    "Register-indirect address [{}] is not supported",
                    name
                )));
            }
            Some(Token::Identifier(name)) => AddressRef::Label(name),
            _ => return Err(self.error_prev("Expected address operand".to_string())),
        };

        if bracketed {
            self.expect(Token::RBracket, "']'")?;
        }
        Ok(addr)
    }

    fn absolute(&self, value: i128, mask: u32) -> Result<AddressRef> {
        if value < 0 || value > mask as i128 {
            return Err(self.error_prev(format!(
                "Address {} does not fit the {}-bit address field",
                value,
                mask.count_ones()
            )));
        }
        Ok(AddressRef::Absolute(value as u32))
    }
}

fn parse_operands(opcode: Opcode, c: &mut Cursor) -> Result<(Instruction, Option<String>)> {
    let mask = match opcode {
        Opcode::Load | Opcode::Store | Opcode::Storer => ADDR25_MASK,
        Opcode::Bne | Opcode::Blt | Opcode::Jle => ADDR23_MASK,
        _ => ADDR27_MASK,
    };

    let mut target = None;
    let mut resolve = |addr: AddressRef| match addr {
        AddressRef::Absolute(a) => a,
        AddressRef::Label(name) => {
            target = Some(name);
            0
        }
    };

    let inst = match opcode.layout() {
        OperandLayout::TypedLiteral | OperandLayout::Empty => match opcode {
            Opcode::Ret => Instruction::Ret,
            Opcode::Halt => Instruction::Halt,
            _ => Instruction::NOP,
        },
        OperandLayout::RegAddr => {
            let reg = c.register()?;
            c.comma()?;
            let addr = resolve(c.address(mask)?);
            match opcode {
                Opcode::Load => Instruction::Load { reg, addr },
                Opcode::Store => Instruction::Store { reg, addr },
                _ => Instruction::Storer { src: reg, addr },
            }
        }
        OperandLayout::DstSrc => {
            let dst = c.register()?;
            c.comma()?;
            let src = c.register()?;
            match opcode {
                Opcode::Move => Instruction::Move { dst, src },
                _ => Instruction::Loadr { dst, src },
            }
        }
        OperandLayout::ThreeReg => {
            let r1 = c.register()?;
            c.comma()?;
            let r2 = c.register()?;
            c.comma()?;
            let dst = c.register()?;
            match opcode {
                Opcode::Add => Instruction::Add { r1, r2, dst },
                Opcode::Sub => Instruction::Sub { r1, r2, dst },
                Opcode::Mul => Instruction::Mul { r1, r2, dst },
                Opcode::Div => Instruction::Div { r1, r2, dst },
                Opcode::And => Instruction::And { r1, r2, dst },
                Opcode::Or => Instruction::Or { r1, r2, dst },
                _ => Instruction::Nor { r1, r2, dst },
            }
        }
        OperandLayout::OneReg => {
            let reg = c.register()?;
            match opcode {
                Opcode::Not => Instruction::Not { reg },
                Opcode::Push => Instruction::Push { reg },
                Opcode::Pop => Instruction::Pop { reg },
                Opcode::In => Instruction::In { reg },
                Opcode::Out => Instruction::Out { reg },
                _ => Instruction::Clr { reg },
            }
        }
        OperandLayout::RegAmount => {
            let reg = c.register()?;
            c.comma()?;
            let amount = c.register()?;
            match opcode {
                Opcode::Shl => Instruction::Shl { reg, amount },
                Opcode::Shr => Instruction::Shr { reg, amount },
                Opcode::Rol => Instruction::Rol { reg, amount },
                _ => Instruction::Ror { reg, amount },
            }
        }
        OperandLayout::TwoReg => {
            let r1 = c.register()?;
            c.comma()?;
            let r2 = c.register()?;
            Instruction::Cmp { r1, r2 }
        }
        OperandLayout::RegRegAddr => {
            let r1 = c.register()?;
            c.comma()?;
            let r2 = c.register()?;
            c.comma()?;
            let addr = resolve(c.address(mask)?);
            match opcode {
                Opcode::Bne => Instruction::Bne { r1, r2, addr },
                Opcode::Blt => Instruction::Blt { r1, r2, addr },
                _ => Instruction::Jle { r1, r2, addr },
            }
        }
        OperandLayout::Addr => {
            let addr = resolve(c.address(mask)?);
            match opcode {
                Opcode::Jump => Instruction::Jump { addr },
                Opcode::Beq => Instruction::Beq { addr },
                _ => Instruction::Call { addr },
            }
        }
    };

    Ok((inst, target))
}

/// `.word` operand:
///
/// - `5`, `0x1F`, `0b101`: raw word
/// - `-3`, `int 5`: Integer literal
/// - `true` / `false`: Boolean literal
/// - `1.5`: Float literal
/// - `'A'`, `char 65`: Char literal
/// - `nat 7`: Natural literal
fn parse_word_literal(c: &mut Cursor) -> Result<u32> {
    let value = match c.next() {
        Some(Token::Number(n)) if n < 0 => TypedValue::Integer(to_i32(c, n as i128)?),
        Some(Token::Number(n)) => return raw_word(c, n as i128),
        Some(Token::Hex(n)) | Some(Token::Binary(n)) => return raw_word(c, n as i128),
        Some(Token::Float(x)) => TypedValue::Float(x as f32),
        Some(Token::Char(ch)) => TypedValue::from_char(ch),
        Some(Token::Identifier(kw)) => match kw.to_ascii_lowercase().as_str() {
            "true" => TypedValue::Boolean(true),
            "false" => TypedValue::Boolean(false),
            "nat" => {
                let n = integer_operand(c)?;
                if n < 0 || n > u32::MAX as i128 {
                    return Err(c.error_prev(format!("Natural literal out of range: {}", n)));
                }
                TypedValue::Natural(n as u32)
            }
            "int" => {
                let n = integer_operand(c)?;
                TypedValue::Integer(to_i32(c, n)?)
            }
            "char" => {
                let n = integer_operand(c)?;
                let code = u32::try_from(n)
                    .ok()
                    .filter(|&code| code <= CHAR_MAX)
                    .ok_or_else(|| c.error_prev(format!("Invalid char code: {}", n)))?;
                TypedValue::Char(code)
            }
            _ => return Err(c.error_prev(format!("Unknown literal keyword: {}", kw))),
        },
        _ => return Err(c.error_prev("Expected literal after .word".to_string())),
    };

    value
        .to_word()
        .map_err(|e| AssemblerError::InvalidImmediate(e.to_string()))
}

fn integer_operand(c: &mut Cursor) -> Result<i128> {
    match c.next() {
        Some(Token::Number(n)) => Ok(n as i128),
        Some(Token::Hex(n)) | Some(Token::Binary(n)) => Ok(n as i128),
        _ => Err(c.error_prev("Expected integer".to_string())),
    }
}

fn to_i32(c: &Cursor, n: i128) -> Result<i32> {
    i32::try_from(n).map_err(|_| c.error_prev(format!("Integer literal out of range: {}", n)))
}

fn raw_word(c: &Cursor, n: i128) -> Result<u32> {
    u32::try_from(n).map_err(|_| c.error_prev(format!("Word does not fit in 32 bits: {}", n)))
}
