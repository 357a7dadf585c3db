use crate::{pos, Board, Error, Pos, Result, World};

const GLIDER: &str = "\
.O.
..O
OOO";

const BLOCK: &str = "\
OO
OO";

const BLINKER: &str = "OOO";

const R_PENTOMINO: &str = "\
.OO
OO.
.O.";

const GOSPER_GUN: &str = "\
........................O...........
......................O.O...........
............OO......OO............OO
...........O...O....OO............OO
OO........O.....O...OO..............
OO........O...O.OO....O.O...........
..........O.....O.......O...........
...........O...O....................
............OO......................";

pub const BUILTINS: [(&str, &str); 5] = [
    ("glider", GLIDER),
    ("block", BLOCK),
    ("blinker", BLINKER),
    ("r-pentomino", R_PENTOMINO),
    ("gosper-gun", GOSPER_GUN),
];

/// A set of live cells relative to a top-left origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    cells: Vec<Pos>,
    width: u32,
    height: u32,
}

impl Pattern {
    /// Reads a plaintext pattern.
    ///
    /// Lines starting with `!` are comments. `O`, `#` and `*` are live
    /// cells, `.` and spaces are dead ones. The size spans every row and
    /// column of the text, blank margins included.
    pub fn parse(text: &str) -> Result<Self> {
        let mut cells = vec![];
        let mut width = 0;
        let mut height = 0;
        let rows = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.starts_with('!'));
        for (y, (index, line)) in rows.enumerate() {
            let line = line.trim_end_matches('\r');
            width = width.max(line.chars().count() as u32);
            height = y as u32 + 1;
            for (x, c) in line.chars().enumerate() {
                match c {
                    'O' | '#' | '*' => cells.push(pos!(x as i32, y as i32)),
                    '.' | ' ' => (),
                    found => {
                        return Err(Error::UnexpectedChar {
                            line: index + 1,
                            column: x + 1,
                            found,
                        })
                    }
                }
            }
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    pub fn builtin(name: &str) -> Result<Self> {
        let (_, text) = BUILTINS
            .iter()
            .find(|(builtin, _)| builtin.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownPattern(name.to_string()))?;
        Self::parse(text)
    }

    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// origin placing the pattern in the middle of `board`.
    pub fn centered_in(&self, board: &impl Board) -> Pos {
        let x = (board.width() as i64 - self.width as i64) / 2;
        let y = (board.height() as i64 - self.height as i64) / 2;
        pos!(x.max(0) as i32, y.max(0) as i32)
    }

    /// spawns the pattern at `origin`, returning how many cells were spawned.
    pub fn place(&self, world: &mut World, origin: Pos) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| world.spawn(origin + cell))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plaintext() {
        let pattern = Pattern::parse("!Name: glider\n.O.\n..O\r\nOOO\n").unwrap();
        assert_eq!(pattern.width(), 3);
        assert_eq!(pattern.height(), 3);
        assert_eq!(
            pattern.cells(),
            &[pos!(1, 0), pos!(2, 1), pos!(0, 2), pos!(1, 2), pos!(2, 2)]
        );
        assert_eq!(pattern, Pattern::builtin("glider").unwrap());
    }

    #[test]
    fn size_includes_blank_margins() {
        let pattern = Pattern::parse("....\n.O..\n....\n").unwrap();
        assert_eq!((pattern.width(), pattern.height()), (4, 3));
        let world = World::new(8, 7).unwrap();
        assert_eq!(pattern.centered_in(&world), pos!(2, 2));
    }

    #[test]
    fn accepts_legacy_cells() {
        let pattern = Pattern::parse("# *\n").unwrap();
        assert_eq!(pattern.cells(), &[pos!(0, 0), pos!(2, 0)]);
    }

    #[test]
    fn rejects_garbage() {
        let err = Pattern::parse("!comment\nOO\nOx").unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedChar {
                line: 3,
                column: 2,
                found: 'x'
            }
        ));
        assert!(matches!(
            Pattern::builtin("spaceship"),
            Err(Error::UnknownPattern(_))
        ));
    }

    #[test]
    fn builtins_parse() {
        for (name, _) in BUILTINS {
            let pattern = Pattern::builtin(name).unwrap();
            assert!(!pattern.cells().is_empty(), "{name}");
        }
        assert_eq!(Pattern::builtin("gosper-gun").unwrap().cells().len(), 36);
    }

    #[test]
    fn place_clips_to_world() {
        let block = Pattern::builtin("block").unwrap();
        let mut world = World::new(4, 4).unwrap();
        assert_eq!(block.centered_in(&world), pos!(1, 1));
        assert_eq!(block.place(&mut world, pos!(3, 3)), 1);
        assert_eq!(block.place(&mut world, pos!(0, 0)), 4);
        assert_eq!(world.population(), 5);
    }
}
