//! Splits a path into a main routine calling up to three movement functions.

use crate::scaffold::path::{self, Command};

/// Longest line, in characters, the robot accepts.
pub const MAX_LINE: usize = 20;
const NAMES: [&str; 3] = ["A", "B", "C"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routines {
    /// indices into `functions`
    pub main: Vec<usize>,
    pub functions: Vec<Vec<Command>>,
}

impl Routines {
    pub fn main_line(&self) -> String {
        self.main.iter().map(|&i| NAMES[i]).collect::<Vec<_>>().join(",")
    }

    /// Main routine followed by functions A, B and C. Unused functions repeat A.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.main_line()];
        for i in 0..NAMES.len() {
            let function = self.functions.get(i).or_else(|| self.functions.first());
            lines.push(function.map(|f| path::render(f)).unwrap_or_default());
        }
        lines
    }

    /// The path the routines describe.
    pub fn expand(&self) -> Vec<Command> {
        self.main.iter().flat_map(|&i| self.functions[i].iter().copied()).collect()
    }
}

fn line_len(commands: &[Command]) -> usize {
    commands.iter().map(|c| c.to_string().len()).sum::<usize>() + commands.len().saturating_sub(1)
}

/// Finds routines covering `path` exactly, or `None` if no three functions do.
/// An empty path has no routines.
pub fn compress(path: &[Command]) -> Option<Routines> {
    if path.is_empty() {
        return None;
    }
    let mut functions = Vec::new();
    let mut main = Vec::new();
    if !search(path, &mut functions, &mut main) {
        return None;
    }
    Some(Routines {
        main,
        functions: functions.into_iter().map(<[Command]>::to_vec).collect(),
    })
}

fn search<'a>(rest: &'a [Command], functions: &mut Vec<&'a [Command]>, main: &mut Vec<usize>) -> bool {
    if rest.is_empty() {
        return true;
    }
    // one more call must still fit: n calls take 2n - 1 characters
    if 2 * (main.len() + 1) - 1 > MAX_LINE {
        return false;
    }

    for i in 0..functions.len() {
        let function = functions[i];
        if let Some(tail) = rest.strip_prefix(function) {
            main.push(i);
            if search(tail, functions, main) {
                return true;
            }
            main.pop();
        }
    }

    if functions.len() < NAMES.len() {
        let longest = (1..=rest.len())
            .take_while(|&end| line_len(&rest[..end]) <= MAX_LINE)
            .last()
            .unwrap_or(0);
        for end in (1..=longest).rev() {
            functions.push(&rest[..end]);
            main.push(functions.len() - 1);
            if search(&rest[end..], functions, main) {
                return true;
            }
            main.pop();
            functions.pop();
        }
    }
    false
}
