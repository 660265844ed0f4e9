/// One line of a block, indented `level` steps past the ambient level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeveledStatement {
    pub level: usize,
    pub text: String,
}

impl LeveledStatement {
    pub fn new(level: usize, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Multi-line output with the ambient-level deltas it declares
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub commands: Vec<LeveledStatement>,
    /// Applied to the ambient level before the first line
    pub starting_level_adjustment: i32,
    /// Applied to the ambient level after the last line
    pub ending_level_adjustment: i32,
}

impl Block {
    pub fn new(commands: Vec<LeveledStatement>) -> Self {
        Self {
            commands,
            ..Default::default()
        }
    }

    /// Opens a construct: the following steps nest one level deeper
    pub fn opening(commands: Vec<LeveledStatement>) -> Self {
        Self {
            commands,
            starting_level_adjustment: 0,
            ending_level_adjustment: 1,
        }
    }

    /// Closes the innermost construct
    pub fn closing(commands: Vec<LeveledStatement>) -> Self {
        Self {
            commands,
            starting_level_adjustment: -1,
            ending_level_adjustment: 0,
        }
    }

    /// Closes one branch and opens the next
    pub fn continuing(commands: Vec<LeveledStatement>) -> Self {
        Self {
            commands,
            starting_level_adjustment: -1,
            ending_level_adjustment: 1,
        }
    }

    /// A `{ ... }` statement group around `inner`
    pub fn braced(inner: Vec<String>) -> Self {
        let mut commands = Vec::with_capacity(inner.len() + 2);
        commands.push(LeveledStatement::new(0, "{"));
        commands.extend(inner.into_iter().map(|text| LeveledStatement::new(1, text)));
        commands.push(LeveledStatement::new(0, "}"));
        Self::new(commands)
    }

    /// Net change this block makes to the ambient level
    pub fn net_adjustment(&self) -> i32 {
        self.starting_level_adjustment + self.ending_level_adjustment
    }
}

/// Output produced for one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// The step has no equivalent in generated code
    Empty,
    Statement(String),
    Block(Block),
}

impl Emission {
    pub fn statement(text: impl Into<String>) -> Self {
        Self::Statement(text.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Emission::Empty)
    }

    pub fn net_adjustment(&self) -> i32 {
        match self {
            Emission::Block(block) => block.net_adjustment(),
            _ => 0,
        }
    }

    /// Lines with their in-block levels, ignoring adjustments
    pub fn lines(&self) -> Vec<LeveledStatement> {
        match self {
            Emission::Empty => Vec::new(),
            Emission::Statement(text) => vec![LeveledStatement::new(0, text.clone())],
            Emission::Block(block) => block.commands.clone(),
        }
    }

    /// Lines joined with newlines, indented by level; handy in tests and logs
    pub fn render(&self, indent: &str) -> String {
        self.lines()
            .iter()
            .map(|line| format!("{}{}", indent.repeat(line.level), line.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<Block> for Emission {
    fn from(block: Block) -> Self {
        Emission::Block(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_braced_block_layout() {
        let block = Block::braced(vec!["$a = 1;".to_string(), "unset($a);".to_string()]);
        let rendered = Emission::from(block).render("  ");
        assert_eq!(rendered, "{\n  $a = 1;\n  unset($a);\n}");
    }

    #[test]
    fn test_adjustments() {
        assert_eq!(Block::opening(vec![]).net_adjustment(), 1);
        assert_eq!(Block::closing(vec![]).net_adjustment(), -1);
        assert_eq!(Block::continuing(vec![]).net_adjustment(), 0);
        assert_eq!(Emission::statement("x;").net_adjustment(), 0);
    }
}
