//! Human-readable value-table dump.
//!
//! Layout:
//!
//! ```text
//! Q-table: <state count>
//! <9-char encoding>
//! <rendered grid>
//! (<row>, <col>) - <value>
//! ```
//!
//! This is diagnostic output only; nothing reads it back.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::{Error, Result, q_learning::QTable, tictactoe::Board};

impl QTable {
    /// Write the table in dump format, states sorted by encoding
    pub fn dump<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "Q-table: {}", self.len())?;
        for (state, actions) in self.sorted_entries() {
            writeln!(writer, "{state}")?;
            write!(writer, "{}", Board::from(state))?;
            for (action, value) in actions {
                writeln!(writer, "{action} - {value}")?;
            }
        }
        Ok(())
    }

    /// Dump the table to a file, replacing any existing content
    pub fn dump_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let io_error = |operation: &str, source| Error::Io {
            operation: format!("{operation} {}", path.display()),
            source,
        };

        let file = File::create(path).map_err(|e| io_error("create", e))?;
        let mut writer = BufWriter::new(file);
        self.dump(&mut writer)
            .and_then(|_| writer.flush())
            .map_err(|e| io_error("write value table to", e))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        q_learning::{QTable, TdParams},
        tictactoe::Action,
        types::StateKey,
    };

    #[test]
    fn test_empty_dump() {
        let mut out = Vec::new();
        QTable::new().dump(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Q-table: 0\n");
    }

    #[test]
    fn test_dump_layout() {
        let mut table = QTable::new();
        let params = TdParams::new(0.5, 0.8);
        let state = StateKey::parse("X---O----").unwrap();
        table.update(&state, Action::new(2, 2), 1.0, None, params);
        table.update(&state, Action::new(0, 1), 0.5, None, params);

        let mut out = Vec::new();
        table.dump(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected = "\
Q-table: 1
X---O----
X | - | -
- - - - -
- | O | -
- - - - -
- | - | -
(0, 1) - 0.25
(2, 2) - 0.5
";
        assert_eq!(text, expected);
    }
}
