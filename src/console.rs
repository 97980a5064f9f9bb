//! Line-oriented console over a [`Dataset`].
//!
//! Each input line is one command. Words and the single-key menu numbers are
//! both accepted:
//!
//! ```text
//! 1 | add <name> <x> <y>        add a point (reports its nearest neighbour)
//! 2 | rm <name>                 remove a point
//! 3 | ls                        list points
//! 4 | plot                      draw the plane
//! 5 | dist <a> <b>              Euclidean distance
//! 6 | knn <name> [k]            k nearest neighbours (k defaults to 1)
//! 7 | cluster <k>               k-means clustering
//! 8 | classify <name> <x> <y>   attach a new point to the nearest group
//! 9 | demo                      load and walk through the demo dataset
//!     clear                     drop all points
//! h | help                      show this help
//! 0 | quit                      leave
//! ```
//!
//! Arguments are separated by whitespace. A name containing spaces is written
//! in double quotes: `add "New York" 1 2`.
//!
//! Rejected commands are reported on the output and never end the session.

use crate::error::{Error, Result};
use crate::neighbors::DistanceResult;
use crate::render::{render, Viewport};
use crate::session::Dataset;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// A parsed console command.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Add a point.
    Add {
        /// Point name.
        name: String,
        /// Horizontal coordinate.
        x: f64,
        /// Vertical coordinate.
        y: f64,
    },
    /// Remove a point.
    Remove {
        /// Point name.
        name: String,
    },
    /// List all points.
    List,
    /// Draw the plane.
    Plot,
    /// Distance between two points.
    Distance {
        /// First point.
        a: String,
        /// Second point.
        b: String,
    },
    /// Nearest neighbours of a point.
    Nearest {
        /// Query point.
        name: String,
        /// Number of neighbours.
        k: usize,
    },
    /// Run k-means.
    Cluster {
        /// Number of groups.
        k: usize,
    },
    /// Classify and insert a new point.
    Classify {
        /// Point name.
        name: String,
        /// Horizontal coordinate.
        x: f64,
        /// Vertical coordinate.
        y: f64,
    },
    /// Load the demo dataset and walk through it.
    Demo,
    /// Drop all points.
    Clear,
    /// Show help.
    Help,
    /// Leave the console.
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let words = tokenize(line)?;
        let Some((head, rest)) = words.split_first() else {
            return Ok(None);
        };
        let head = head.as_str();
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        let cmd = match head.to_ascii_lowercase().as_str() {
            "1" | "add" => {
                let [name, x, y] = expect_args::<3>(head, &args)?;
                Command::Add {
                    name: name.to_string(),
                    x: parse_coord(x)?,
                    y: parse_coord(y)?,
                }
            }
            "2" | "rm" | "remove" => {
                let [name] = expect_args::<1>(head, &args)?;
                Command::Remove {
                    name: name.to_string(),
                }
            }
            "3" | "ls" | "list" => Command::List,
            "4" | "plot" => Command::Plot,
            "5" | "dist" => {
                let [a, b] = expect_args::<2>(head, &args)?;
                Command::Distance {
                    a: a.to_string(),
                    b: b.to_string(),
                }
            }
            "6" | "knn" => match args.as_slice() {
                [name] => Command::Nearest {
                    name: name.to_string(),
                    k: 1,
                },
                [name, k] => Command::Nearest {
                    name: name.to_string(),
                    k: parse_count(k)?,
                },
                _ => return Err(usage(head, "<name> [k]")),
            },
            "7" | "cluster" => {
                let [k] = expect_args::<1>(head, &args)?;
                Command::Cluster { k: parse_count(k)? }
            }
            "8" | "classify" => {
                let [name, x, y] = expect_args::<3>(head, &args)?;
                Command::Classify {
                    name: name.to_string(),
                    x: parse_coord(x)?,
                    y: parse_coord(y)?,
                }
            }
            "9" | "demo" => Command::Demo,
            "clear" => Command::Clear,
            "h" | "?" | "help" => Command::Help,
            "0" | "q" | "quit" | "exit" => Command::Quit,
            other => {
                return Err(Error::InvalidInput(format!(
                    "unknown command {other:?}; type 'help'"
                )))
            }
        };
        Ok(Some(cmd))
    }
}

/// Split a line on whitespace, keeping double-quoted runs together.
fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current: Option<String> = None;
    let mut quoted = false;
    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                current.get_or_insert_with(String::new);
            }
            c if c.is_whitespace() && !quoted => {
                words.extend(current.take());
            }
            c => current.get_or_insert_with(String::new).push(c),
        }
    }
    if quoted {
        return Err(Error::InvalidInput("unterminated quote".to_string()));
    }
    words.extend(current);
    Ok(words)
}

fn expect_args<'a, const N: usize>(head: &str, args: &[&'a str]) -> Result<[&'a str; N]> {
    <[&str; N]>::try_from(args).map_err(|_| {
        Error::InvalidInput(format!("{head} expects {N} argument(s), got {}", args.len()))
    })
}

fn usage(head: &str, shape: &str) -> Error {
    Error::InvalidInput(format!("usage: {head} {shape}"))
}

fn parse_coord(s: &str) -> Result<f64> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Error::InvalidInput(format!("{s:?} is not a valid coordinate"))),
    }
}

fn parse_count(s: &str) -> Result<usize> {
    s.parse::<usize>()
        .map_err(|_| Error::InvalidInput(format!("{s:?} is not a valid count")))
}

/// Whether the console keeps reading after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command.
    Continue,
    /// Stop.
    Quit,
}

const HELP: &str = "\
  1 | add <name> <x> <y>        add a point
  2 | rm <name>                 remove a point
  3 | ls                        list points
  4 | plot                      draw the plane
  5 | dist <a> <b>              Euclidean distance
  6 | knn <name> [k]            k nearest neighbours
  7 | cluster <k>               k-means clustering
  8 | classify <name> <x> <y>   attach a new point to the nearest group
  9 | demo                      demo dataset (15 points, 3 clusters)
      clear                     drop all points
  h | help                      this help
                                quote names with spaces: add \"New York\" 1 2
  0 | quit                      leave
";

/// Interactive front-end writing to `W`.
pub struct Console<W: Write> {
    dataset: Dataset,
    viewport: Viewport,
    out: W,
}

impl<W: Write> Console<W> {
    /// Create a console over `dataset`, drawing with `viewport`.
    pub fn new(dataset: Dataset, viewport: Viewport, out: W) -> Self {
        Self {
            dataset,
            viewport,
            out,
        }
    }

    /// The session state.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Give back the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Read commands from `input` until `quit` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        writeln!(self.out, "  2D plane: k-NN & clustering. Type 'help' for commands.")?;
        self.status()?;
        for line in input.lines() {
            if self.handle_line(&line?)? == Flow::Quit {
                return Ok(());
            }
            self.status()?;
        }
        Ok(())
    }

    /// Parse and execute one line, reporting rejected commands.
    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        match Command::parse(line) {
            Ok(Some(cmd)) => self.execute(cmd),
            Ok(None) => Ok(Flow::Continue),
            Err(e) => {
                self.reject(&e)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Execute one command.
    pub fn execute(&mut self, cmd: Command) -> io::Result<Flow> {
        debug!(?cmd, "executing");
        match self.dispatch(cmd) {
            Ok(flow) => Ok(flow),
            Err(Failure::Rejected(e)) => {
                self.reject(&e)?;
                Ok(Flow::Continue)
            }
            Err(Failure::Io(e)) => Err(e),
        }
    }

    fn dispatch(&mut self, cmd: Command) -> std::result::Result<Flow, Failure> {
        match cmd {
            Command::Add { name, x, y } => {
                self.dataset.add_point(&name, x, y)?;
                let name = name.trim();
                writeln!(self.out, "  [OK] point '{name}' added at ({x}, {y}).")?;
                if let Some(nn) = self.dataset.nearest(name, 1)?.first() {
                    writeln!(
                        self.out,
                        "  nearest neighbour: {}  (d = {:.4})",
                        nn.point_name, nn.distance
                    )?;
                }
            }
            Command::Remove { name } => {
                let removed = self.dataset.remove_point(&name)?;
                writeln!(self.out, "  [OK] '{}' removed.", removed.name)?;
            }
            Command::List => self.list()?,
            Command::Plot => self.plot("2D CARTESIAN PLANE")?,
            Command::Distance { a, b } => {
                let d = self.dataset.distance_between(&a, &b)?;
                writeln!(self.out, "  d({a}, {b}) = {d:.6}")?;
            }
            Command::Nearest { name, k } => {
                let nn = self.dataset.nearest(&name, k)?;
                self.print_nearest(&name, &nn)?;
            }
            Command::Cluster { k } => {
                self.dataset.run_clustering(k)?;
                self.cluster_stats()?;
                self.plot("K-MEANS CLUSTERING")?;
            }
            Command::Classify { name, x, y } => {
                let g = self.dataset.classify_and_insert(&name, x, y)?;
                let group = &self.dataset.groups()[g];
                writeln!(
                    self.out,
                    "  >> '{}' classified into {} [{}]",
                    name.trim(),
                    group.name,
                    group.symbol
                )?;
                self.plot(&format!("CLASSIFIED: {}", name.trim()))?;
            }
            Command::Demo => self.demo()?,
            Command::Clear => {
                self.dataset.clear();
                writeln!(self.out, "  [OK] all points removed.")?;
            }
            Command::Help => self.out.write_all(HELP.as_bytes())?,
            Command::Quit => {
                writeln!(self.out, "  bye!")?;
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    fn demo(&mut self) -> std::result::Result<(), Failure> {
        writeln!(self.out, "  DEMO: 15 points, 3 natural clusters")?;
        self.dataset.load_demo();

        writeln!(self.out, "\n  step 1/4: points")?;
        self.list()?;

        writeln!(self.out, "\n  step 2/4: plane")?;
        self.plot("DATASET: 15 POINTS")?;

        let first = self.dataset.points()[0].name.clone();
        writeln!(self.out, "\n  step 3/4: 3-NN of {first}")?;
        let nn = self.dataset.nearest(&first, 3)?;
        self.print_nearest(&first, &nn)?;

        writeln!(self.out, "\n  step 4/4: k-means with k = 3")?;
        self.dataset.run_clustering(3)?;
        self.cluster_stats()?;
        self.plot("K-MEANS k=3")?;

        let g = self.dataset.classify_and_insert("NEW", 0.5, -2.0)?;
        let group = &self.dataset.groups()[g];
        writeln!(
            self.out,
            "  NEW (0.5, -2.0) classified into {} [{}]",
            group.name, group.symbol
        )?;
        self.plot("CLASSIFIED: NEW")?;
        Ok(())
    }

    fn list(&mut self) -> io::Result<()> {
        if self.dataset.is_empty() {
            return writeln!(self.out, "  (no points)");
        }
        let rule = "  +----------+----------+----------+----------+";
        writeln!(self.out, "{rule}")?;
        writeln!(self.out, "  |   Name   |    X     |    Y     |  Group   |")?;
        writeln!(self.out, "{rule}")?;
        for row in self.dataset.rows() {
            writeln!(
                self.out,
                "  | {:<8} | {:>8.2} | {:>8.2} | {:<8} |",
                row.name,
                row.x,
                row.y,
                row.group_label.as_deref().unwrap_or("--")
            )?;
        }
        writeln!(self.out, "{rule}")
    }

    fn print_nearest(&mut self, name: &str, nn: &[DistanceResult]) -> io::Result<()> {
        let rule = "  +-----+----------+----------------+";
        writeln!(self.out, "  k-NN for {}", name.trim())?;
        writeln!(self.out, "{rule}")?;
        writeln!(self.out, "  |  #  | Neighbour|    Distance    |")?;
        writeln!(self.out, "{rule}")?;
        for (i, r) in nn.iter().enumerate() {
            writeln!(
                self.out,
                "  | {:>3} | {:<8} | {:>14.6} |",
                i + 1,
                r.point_name,
                r.distance
            )?;
        }
        writeln!(self.out, "{rule}")?;
        if let Some(best) = nn.first() {
            writeln!(
                self.out,
                "  >> nearest: {}  (d = {:.4})",
                best.point_name, best.distance
            )?;
        }
        Ok(())
    }

    fn cluster_stats(&mut self) -> io::Result<()> {
        let rule = "  +----------------+--------+------------------+";
        writeln!(self.out, "{rule}")?;
        writeln!(self.out, "  |     Group      | Points |     Centroid     |")?;
        writeln!(self.out, "{rule}")?;
        for s in self.dataset.group_summaries() {
            writeln!(
                self.out,
                "  | {:<14} | {:>6} | {:>16} |",
                s.group.name,
                s.members,
                format!("{:.2}", s.group.centroid)
            )?;
        }
        writeln!(self.out, "{rule}")
    }

    fn plot(&mut self, title: &str) -> io::Result<()> {
        let canvas = render(self.dataset.points(), self.dataset.groups(), &self.viewport);
        self.out
            .write_all(canvas.framed(title, self.dataset.groups()).as_bytes())
    }

    fn status(&mut self) -> io::Result<()> {
        let sep = format!("  {}", "-".repeat(46));
        writeln!(self.out, "{sep}")?;
        let groups = match self.dataset.groups().len() {
            0 => "no clustering".to_string(),
            n => format!("groups: {n}"),
        };
        writeln!(self.out, "  points: {}  |  {}", self.dataset.len(), groups)?;
        if !self.dataset.is_empty() {
            let names: Vec<&str> = self.dataset.points().iter().map(|p| p.name.as_str()).collect();
            writeln!(self.out, "  -> {}", names.join(", "))?;
        }
        writeln!(self.out, "{sep}")?;
        write!(self.out, "  > ")?;
        self.out.flush()
    }

    fn reject(&mut self, e: &Error) -> io::Result<()> {
        debug!(error = %e, "command rejected");
        writeln!(self.out, "  [!] {e}")
    }
}

/// Why a command did not complete.
enum Failure {
    Rejected(Error),
    Io(io::Error),
}

impl From<Error> for Failure {
    fn from(e: Error) -> Self {
        Failure::Rejected(e)
    }
}

impl From<io::Error> for Failure {
    fn from(e: io::Error) -> Self {
        Failure::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console() -> Console<Vec<u8>> {
        Console::new(Dataset::new(), Viewport::default(), Vec::new())
    }

    fn output(c: Console<Vec<u8>>) -> String {
        String::from_utf8(c.into_output()).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("add A 1 -2.5").unwrap(),
            Some(Command::Add {
                name: "A".into(),
                x: 1.0,
                y: -2.5
            })
        );
        assert_eq!(
            Command::parse("  1  B 0 0 ").unwrap(),
            Some(Command::Add {
                name: "B".into(),
                x: 0.0,
                y: 0.0
            })
        );
        assert_eq!(
            Command::parse("knn A").unwrap(),
            Some(Command::Nearest {
                name: "A".into(),
                k: 1
            })
        );
        assert_eq!(
            Command::parse("6 A 3").unwrap(),
            Some(Command::Nearest {
                name: "A".into(),
                k: 3
            })
        );
        assert_eq!(Command::parse("CLUSTER 2").unwrap(), Some(Command::Cluster { k: 2 }));
        assert_eq!(Command::parse("0").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_quoted_names() {
        assert_eq!(
            Command::parse(r#"add "New York" 1 2"#).unwrap(),
            Some(Command::Add {
                name: "New York".into(),
                x: 1.0,
                y: 2.0
            })
        );
        assert_eq!(
            Command::parse(r#"dist "a  b" c"#).unwrap(),
            Some(Command::Distance {
                a: "a  b".into(),
                b: "c".into()
            })
        );
        assert!(matches!(
            Command::parse(r#"add "New York 1 2"#),
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(tokenize(r#"rm """#).unwrap(), vec!["rm".to_string(), String::new()]);
    }

    #[test]
    fn test_quoted_names_in_session() {
        let mut c = console();
        let script = "add \"New York\" 0 0\nadd A 3 4\ndist \"New York\" A\nrm \"New York\"\n";
        c.run(script.as_bytes()).unwrap();

        assert_eq!(c.dataset().len(), 1);
        assert!(c.dataset().point("New York").is_none());
        assert!(output(c).contains("d(New York, A) = 5.000000"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for line in [
            "add A x 1",
            "add A 1",
            "add A 1 inf",
            "cluster two",
            "cluster -1",
            "knn",
            "knn A 1 2",
            "dist A",
            "frobnicate",
        ] {
            assert!(
                matches!(Command::parse(line), Err(Error::InvalidInput(_))),
                "{line:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_session_script() {
        let mut c = console();
        let script = "add A 0 0\nadd B 0 1\nadd C 10 10\nadd D 10 11\ncluster 2\nclassify E 9 9\nls\nquit\nadd Z 1 1\n";
        c.run(script.as_bytes()).unwrap();

        assert_eq!(c.dataset().len(), 5);
        assert!(c.dataset().point("Z").is_none());
        assert_eq!(c.dataset().groups().len(), 2);

        let out = output(c);
        assert!(out.contains("nearest neighbour: A  (d = 1.0000)"));
        assert!(out.contains("classified into"));
        assert!(out.contains("Legend:"));
        assert!(out.contains("bye!"));
    }

    #[test]
    fn test_errors_are_reported_not_fatal() {
        let mut c = console();
        let script = "add A 0 0\nadd A 1 1\nrm nobody\ncluster 5\nclassify N 0 0\nadd B nope 1\nadd B 3 4\ndist A B\n";
        c.run(script.as_bytes()).unwrap();

        assert_eq!(c.dataset().len(), 2);
        let out = output(c);
        assert!(out.contains("[!] a point named \"A\" already exists"));
        assert!(out.contains("[!] no point named \"nobody\""));
        assert!(out.contains("[!] invalid cluster count"));
        assert!(out.contains("[!] no clustering available"));
        assert!(out.contains("[!] invalid input"));
        assert!(out.contains("d(A, B) = 5.000000"));
    }

    #[test]
    fn test_demo_walkthrough() {
        let mut c = console();
        assert_eq!(c.execute(Command::Demo).unwrap(), Flow::Continue);
        assert_eq!(c.dataset().len(), 16);
        assert_eq!(c.dataset().groups().len(), 3);
        assert!(c.dataset().point("NEW").unwrap().group.is_some());

        let out = output(c);
        assert!(out.contains("k-NN for A1"));
        assert!(out.contains("K-MEANS k=3"));
        assert!(out.contains("Group-3"));
    }

    #[test]
    fn test_clear_and_empty_listing() {
        let mut c = console();
        c.handle_line("add A 1 1").unwrap();
        c.handle_line("clear").unwrap();
        c.handle_line("ls").unwrap();
        assert!(c.dataset().is_empty());
        assert!(output(c).contains("(no points)"));
    }
}
