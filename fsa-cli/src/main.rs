use crate::automata::AutomataType;
use clap::{Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::{Path, PathBuf};

mod automata;
mod binary_op;
mod enumerate;
mod equivalence;
mod intersection;
mod test_files;
mod union;

/// Compile regular expressions to automata, minimize DFAs, and check equivalence or acceptance
/// from the command line.
#[derive(Parser, Debug)]
#[command(name = "fsa", version, about)]
pub struct FsaArgs {
    /// Suppress the informational progress lines; print only the requested result
    #[arg(long, global = true)]
    pub no_log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check whether one or more files of automata/regexes are equivalent to a reference automaton
    Equivalence(EquivalenceArgs),
    /// Run an automaton against lines of input, or check whole files for full acceptance
    TestFiles(TestFileArgs),
    /// Enumerate words accepted by a regex, in length-then-lexicographic order
    EnumerateRegex(EnumerateRegexArgs),
    /// Enumerate words accepted by a stored automaton
    EnumerateFile(EnumerateFileArgs),
    /// Union of two DFAs read from files
    Union(UnionArgs),
    /// Intersection of two DFAs read from files
    Intersection(IntersectionArgs),
    /// Union, intersection, difference or symmetric difference of two automata, with optional
    /// minimization and comparison against a third automaton
    BinaryOp(BinaryOpArgs),
}

#[derive(clap::Args, Debug)]
pub struct EquivalenceArgs {
    /// File holding the reference automaton or regex
    pub automata: PathBuf,
    /// Type of the reference automaton
    #[arg(long, value_enum, default_value_t = AutomataType::Dfa)]
    pub r#type: AutomataType,
    /// Type of `automata`, if different from `type` (which then describes the files compared against)
    #[arg(long, value_enum)]
    pub in_type: Option<AutomataType>,
    /// Minimize the reference DFA first, and report if a compared-to DFA isn't already minimal
    #[arg(long)]
    pub minimized: bool,
    /// Print only `true`/`false` instead of a descriptive result
    #[arg(long)]
    pub bool: bool,
    /// How many trailing path components to print per result line (0 prints none)
    #[arg(long, default_value_t = 1)]
    pub path_length: usize,
    /// Suppress informational log lines (mirrors the global --no-log)
    #[arg(long)]
    pub no_log: bool,
    /// Files, each holding an automaton/regex of `type`, to test against `automata`
    pub files: Vec<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct TestFileArgs {
    /// File holding the automaton to test with
    pub automata: PathBuf,
    /// Type of `automata`
    #[arg(long, value_enum, default_value_t = AutomataType::Dfa)]
    pub r#type: AutomataType,
    /// Whether to test file contents line-by-line or as a single all-must-accept check
    #[arg(long, value_enum, default_value_t = TestType::Lines)]
    pub test_type: TestType,
    /// Input files to test
    pub files: Vec<PathBuf>,
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TestType {
    #[default]
    Lines,
    Files,
}

#[derive(clap::Args, Debug)]
pub struct EnumerateRegexArgs {
    /// The regex to enumerate words of
    pub regex: String,
    /// How many words to print
    #[arg(long, default_value_t = 10)]
    pub amount: usize,
}

#[derive(clap::Args, Debug)]
pub struct EnumerateFileArgs {
    /// File holding the automaton to enumerate words of
    pub file: PathBuf,
    /// Type of `file`
    #[arg(long, value_enum, default_value_t = AutomataType::Dfa)]
    pub r#type: AutomataType,
    /// How many words to print
    #[arg(long, default_value_t = 10)]
    pub amount: usize,
}

#[derive(clap::Args, Debug)]
pub struct UnionArgs {
    pub first_dfa: PathBuf,
    pub second_dfa: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct IntersectionArgs {
    pub first_dfa: PathBuf,
    pub second_dfa: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct BinaryOpArgs {
    /// Which boolean operation to compute
    #[arg(long, value_enum, default_value_t = BinaryOperation::Union)]
    pub op: BinaryOperation,
    /// First input file
    pub first: PathBuf,
    /// Type of both input files, unless `second_type` is given
    #[arg(long, value_enum, default_value_t = AutomataType::Dfa)]
    pub r#type: AutomataType,
    /// Second input file
    pub second: PathBuf,
    /// Type of the second input file, if different from `type`
    #[arg(long, value_enum)]
    pub second_type: Option<AutomataType>,
    /// Minimize inputs before combining, and minimize the result
    #[arg(long)]
    pub minimized: bool,
    /// Print the first N words of the resulting language
    #[arg(long)]
    pub generate: Option<usize>,
    /// Check the result for equivalence against a third automaton
    #[arg(long)]
    pub compare_against: Option<PathBuf>,
    /// Type of `compare_against`
    #[arg(long, value_enum, default_value_t = AutomataType::Dfa)]
    pub compared_type: AutomataType,
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BinaryOperation {
    #[default]
    Union,
    Intersection,
    Difference,
    SymmetricDifference,
}

impl BinaryOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperation::Union => "Union",
            BinaryOperation::Intersection => "Intersection",
            BinaryOperation::Difference => "Difference",
            BinaryOperation::SymmetricDifference => "Symmetric difference",
        }
    }
}

impl fmt::Display for BinaryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the last `n` path components joined with `/`, or `None` if `n` is zero.
pub fn last_n_components(path: &Path, n: usize) -> Option<String> {
    if n == 0 {
        return None;
    }
    let components: Vec<_> = path.components().collect();
    let take = components.len().min(n);
    let tail = &components[components.len() - take..];
    Some(
        tail.iter()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
    )
}

fn main() {
    let args = FsaArgs::parse();

    let result = run(&args);
    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &FsaArgs) -> Result<(), String> {
    let mut stdout = |s: &str| println!("{s}");

    match &args.command {
        Command::Equivalence(a) => {
            let file = std::fs::read_to_string(&a.automata).map_err(|e| e.to_string())?;
            equivalence::equivalence(args, a, &file);
            Ok(())
        }
        Command::TestFiles(a) => test_files::test_files(args, a, &mut stdout),
        Command::EnumerateRegex(a) => enumerate::enumerate_regex(args, a, &mut stdout),
        Command::EnumerateFile(a) => enumerate::enumerate_file(args, a, &mut stdout),
        Command::Union(a) => {
            union::union(args, a);
            Ok(())
        }
        Command::Intersection(a) => {
            intersection::intersection(args, a);
            Ok(())
        }
        Command::BinaryOp(a) => binary_op::binary_op(args, a, a.op, &mut stdout),
    }
}
