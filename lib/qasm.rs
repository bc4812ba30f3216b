//! Interpreter for line-record circuit descriptions in the style of early
//! QASM.
//!
//! One instruction per record, fields comma-separated, qubit operands
//! 1-based, `#` starting an inline comment. The historical format embeds the
//! first operand in the command field (`"cnot 1", 2`); that form is accepted
//! alongside the uniform `"cnot", 1, 2`.
//!
//! The interpreter folds records over a [`PauliOp`] strictly in order. The
//! `tron`/`troff` pseudo-instructions toggle tracing; while tracing is on,
//! each gate instruction emits a [`TraceStep`] to a caller-supplied sink
//! holding the operator string before and after the gate. Record parsing and
//! gate application stop at the first error, leaving the operator with the
//! effect of every instruction applied up to that point.

use std::fmt;
use itertools::Itertools;
use thiserror::Error;
use crate::pauli::{ PauliError, PauliOp };

#[derive(Clone, Debug, Error)]
pub enum QasmError {
    /// Returned when a record's command token is not in the vocabulary.
    #[error("record {line}: unknown command {cmd:?}")]
    UnknownCommand { line: usize, cmd: String },

    /// Returned when a record carries the wrong number of qubit operands for
    /// its command.
    #[error("record {line}: {cmd} expects {expected} operand(s); got {got}")]
    WrongArity { line: usize, cmd: Command, expected: usize, got: usize },

    /// Returned when an operand field is not a 1-based qubit index.
    #[error("record {line}: invalid qubit operand {field:?}")]
    BadOperand { line: usize, field: String },

    #[error(transparent)]
    Pauli(#[from] PauliError),
}

/// The closed instruction vocabulary.
///
/// Every command is dispatched by exhaustive match; an unknown name is
/// rejected when the record is parsed, not when it is executed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Pauli X conjugation
    X,
    /// Pauli Y conjugation
    Y,
    /// Pauli Z conjugation
    Z,
    /// Hadamard conjugation
    H,
    /// Phase-gate conjugation
    P,
    /// CNOT conjugation (alias `cx`)
    Cnot,
    /// CZ conjugation (alias `cz`)
    Csign,
    /// Controlled-Y conjugation
    Cy,
    /// Qubit swap
    Swap,
    /// Enable tracing
    Tron,
    /// Disable tracing
    Troff,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::Z => write!(f, "z"),
            Self::H => write!(f, "h"),
            Self::P => write!(f, "p"),
            Self::Cnot => write!(f, "cnot"),
            Self::Csign => write!(f, "csign"),
            Self::Cy => write!(f, "cy"),
            Self::Swap => write!(f, "swap"),
            Self::Tron => write!(f, "tron"),
            Self::Troff => write!(f, "troff"),
        }
    }
}

impl Command {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "x" => Some(Self::X),
            "y" => Some(Self::Y),
            "z" => Some(Self::Z),
            "h" => Some(Self::H),
            "p" => Some(Self::P),
            "cnot" | "cx" => Some(Self::Cnot),
            "csign" | "cz" => Some(Self::Csign),
            "cy" => Some(Self::Cy),
            "swap" => Some(Self::Swap),
            "tron" => Some(Self::Tron),
            "troff" => Some(Self::Troff),
            _ => None,
        }
    }

    fn arity(self) -> usize {
        match self {
            Self::X | Self::Y | Self::Z | Self::H | Self::P => 1,
            Self::Cnot | Self::Csign | Self::Cy | Self::Swap => 2,
            Self::Tron | Self::Troff => 0,
        }
    }
}

/// A single parsed instruction: a command plus its qubit operands, already
/// converted to 0-based indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub cmd: Command,
    pub args: Vec<usize>,
}

impl Instruction {
    /// Parse one record, numbered `line` (1-based) for error reporting.
    ///
    /// Returns `Ok(None)` for blank or comment-only records.
    pub fn parse_record(record: &str, line: usize)
        -> Result<Option<Self>, QasmError>
    {
        let text = record.split('#').next().unwrap_or("");
        let mut fields = text.split(',').map(str::trim);
        let head = fields.next().unwrap_or("");
        if head.is_empty() && text.trim().is_empty() {
            return Ok(None);
        }
        let mut head_tokens = head.split_whitespace();
        let Some(name) = head_tokens.next() else { return Ok(None); };
        let cmd = Command::from_name(name)
            .ok_or_else(|| QasmError::UnknownCommand {
                line,
                cmd: name.to_string(),
            })?;
        let mut args: Vec<usize> = Vec::with_capacity(2);
        for field in head_tokens.chain(fields.filter(|f| !f.is_empty())) {
            let k: usize = field.parse()
                .ok()
                .filter(|k| *k >= 1)
                .ok_or_else(|| QasmError::BadOperand {
                    line,
                    field: field.to_string(),
                })?;
            args.push(k - 1);
        }
        if args.len() != cmd.arity() {
            return Err(QasmError::WrongArity {
                line,
                cmd,
                expected: cmd.arity(),
                got: args.len(),
            });
        }
        Ok(Some(Self { cmd, args }))
    }
}

/// One traced instruction: operator string before, the command and its
/// 0-based operands, and the operator string after.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceStep {
    pub before: String,
    pub cmd: Command,
    pub args: Vec<usize>,
    pub after: String,
}

impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f, "{}  {}\t[{}]\t{}",
            self.before, self.cmd, self.args.iter().format(", "), self.after,
        )
    }
}

fn apply(op: &mut PauliOp, inst: &Instruction) -> Result<(), PauliError> {
    match inst.cmd {
        Command::X => { op.apply_x(inst.args[0])?; },
        Command::Y => { op.apply_y(inst.args[0])?; },
        Command::Z => { op.apply_z(inst.args[0])?; },
        Command::H => { op.apply_h(inst.args[0])?; },
        Command::P => { op.apply_s(inst.args[0])?; },
        Command::Cnot => { op.apply_cnot(inst.args[0], inst.args[1])?; },
        Command::Csign => { op.apply_cz(inst.args[0], inst.args[1])?; },
        Command::Cy => { op.apply_cy(inst.args[0], inst.args[1])?; },
        Command::Swap => { op.apply_swap(inst.args[0], inst.args[1])?; },
        Command::Tron | Command::Troff => { },
    }
    Ok(())
}

/// Fold a series of instruction records over an operator, in order.
///
/// Tracing starts disabled and persists across records until toggled by
/// `tron`/`troff`; while enabled, every gate instruction passes a
/// [`TraceStep`] to `trace`.
pub fn execute<'a, I, F>(op: &mut PauliOp, records: I, mut trace: F)
    -> Result<(), QasmError>
where
    I: IntoIterator<Item = &'a str>,
    F: FnMut(TraceStep),
{
    let mut tracing = false;
    for (k, record) in records.into_iter().enumerate() {
        let Some(inst) = Instruction::parse_record(record, k + 1)?
            else { continue; };
        match inst.cmd {
            Command::Tron => { tracing = true; continue; },
            Command::Troff => { tracing = false; continue; },
            _ => { },
        }
        if tracing {
            let before = op.to_string();
            apply(op, &inst)?;
            trace(TraceStep {
                before,
                cmd: inst.cmd,
                args: inst.args,
                after: op.to_string(),
            });
        } else {
            apply(op, &inst)?;
        }
    }
    Ok(())
}

/// [`execute`] with each trace step printed to stdout.
pub fn execute_printing<'a, I>(op: &mut PauliOp, records: I)
    -> Result<(), QasmError>
where I: IntoIterator<Item = &'a str>
{
    execute(op, records, |step| { println!("{}", step); })
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse_op(s: &str) -> PauliOp { s.parse().unwrap() }

    fn inst(cmd: Command, args: &[usize]) -> Instruction {
        Instruction { cmd, args: args.to_vec() }
    }

    #[test]
    fn parse_record_split_operand_form() {
        assert_eq!(
            Instruction::parse_record("cnot 1, 2", 1).unwrap(),
            Some(inst(Command::Cnot, &[0, 1])),
        );
        assert_eq!(
            Instruction::parse_record("h 3", 1).unwrap(),
            Some(inst(Command::H, &[2])),
        );
    }

    #[test]
    fn parse_record_uniform_form() {
        assert_eq!(
            Instruction::parse_record("cnot, 1, 2", 1).unwrap(),
            Some(inst(Command::Cnot, &[0, 1])),
        );
        assert_eq!(
            Instruction::parse_record("swap, 2, 3", 1).unwrap(),
            Some(inst(Command::Swap, &[1, 2])),
        );
    }

    #[test]
    fn parse_record_aliases() {
        assert_eq!(
            Instruction::parse_record("cx 1, 2", 1).unwrap().unwrap().cmd,
            Command::Cnot,
        );
        assert_eq!(
            Instruction::parse_record("cz 1, 2", 1).unwrap().unwrap().cmd,
            Command::Csign,
        );
    }

    #[test]
    fn parse_record_blank_and_comments() {
        assert_eq!(Instruction::parse_record("", 1).unwrap(), None);
        assert_eq!(Instruction::parse_record("   ", 1).unwrap(), None);
        assert_eq!(Instruction::parse_record("# a comment", 1).unwrap(), None);
        assert_eq!(
            Instruction::parse_record("x 1 # flip it", 1).unwrap(),
            Some(inst(Command::X, &[0])),
        );
        assert_eq!(
            Instruction::parse_record("cnot 1, 2 # entangle", 1).unwrap(),
            Some(inst(Command::Cnot, &[0, 1])),
        );
    }

    #[test]
    fn parse_record_errors() {
        assert!(matches!(
            Instruction::parse_record("frobnicate 1", 7),
            Err(QasmError::UnknownCommand { line: 7, .. }),
        ));
        assert!(matches!(
            Instruction::parse_record("h 1, 2", 1),
            Err(QasmError::WrongArity { expected: 1, got: 2, .. }),
        ));
        assert!(matches!(
            Instruction::parse_record("cnot 1", 1),
            Err(QasmError::WrongArity { expected: 2, got: 1, .. }),
        ));
        // operands are 1-based; 0 is not a qubit
        assert!(matches!(
            Instruction::parse_record("h 0", 1),
            Err(QasmError::BadOperand { .. }),
        ));
        assert!(matches!(
            Instruction::parse_record("cnot 1, two", 1),
            Err(QasmError::BadOperand { .. }),
        ));
    }

    #[test]
    fn execute_applies_in_order() {
        let mut op = parse_op("+X");
        execute(&mut op, ["h 1", "p 1", "p 1"], |_| { }).unwrap();
        // X -h-> Z -p-> Z -p-> Z
        assert_eq!(op.to_string(), "+Z");
    }

    #[test]
    fn execute_converts_operands_to_0_based() {
        let mut op = parse_op("+1X");
        execute(&mut op, ["h 2"], |_| { }).unwrap();
        assert_eq!(op.to_string(), "+1Z");
    }

    #[test]
    fn tracing_toggles_and_records_steps() {
        let mut op = parse_op("+X");
        let mut steps: Vec<TraceStep> = Vec::new();
        let records = ["tron", "h 1", "troff", "h 1"];
        execute(&mut op, records, |step| { steps.push(step); }).unwrap();
        assert_eq!(op.to_string(), "+X");
        assert_eq!(
            steps,
            vec![TraceStep {
                before: "+X".to_string(),
                cmd: Command::H,
                args: vec![0],
                after: "+Z".to_string(),
            }],
        );
    }

    #[test]
    fn unknown_command_aborts_without_further_mutation() {
        let mut op = parse_op("+X");
        let records = ["z 1", "frobnicate 1", "h 1"];
        let res = execute(&mut op, records, |_| { });
        assert!(matches!(
            res,
            Err(QasmError::UnknownCommand { line: 2, .. }),
        ));
        // only the first record took effect
        assert_eq!(op.to_string(), "-X");
    }

    #[test]
    fn gate_errors_surface_with_partial_effect() {
        let mut op = parse_op("+XZ");
        let records = ["h 1", "cnot 1, 3"];
        let res = execute(&mut op, records, |_| { });
        assert!(matches!(res, Err(QasmError::Pauli(_))));
        assert_eq!(op.to_string(), "+ZZ");
    }

    #[test]
    fn trace_step_display() {
        let step = TraceStep {
            before: "+XZ".to_string(),
            cmd: Command::Cnot,
            args: vec![0, 1],
            after: "-YY".to_string(),
        };
        assert_eq!(step.to_string(), "+XZ  cnot\t[0, 1]\t-YY");
    }

    #[test]
    fn full_program() {
        // build up a GHZ-style propagation: X1 -> XX -> XXX
        let mut op = parse_op("+X11");
        let records = [
            "# prepare",
            "cnot 1, 2",
            "cnot 2, 3",
            "",
            "swap 1, 3",
        ];
        execute(&mut op, records, |_| { }).unwrap();
        assert_eq!(op.to_string(), "+XXX");
    }
}
