use colored::Colorize;

/// Horizontal alignment of a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Declarative description of a table column.
#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub min_width: usize,
    pub align: Align,
}

impl TableColumn {
    pub fn left(header: impl Into<String>, min_width: usize) -> Self {
        Self {
            header: header.into(),
            min_width,
            align: Align::Left,
        }
    }

    pub fn right(header: impl Into<String>, min_width: usize) -> Self {
        Self {
            header: header.into(),
            min_width,
            align: Align::Right,
        }
    }
}

/// Simple table model used for rendering read-only dashboard sections.
#[derive(Debug, Clone)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    pub footer: Option<Vec<String>>,
}

impl Table {
    pub fn new<T: Into<String>>(title: Option<T>, columns: Vec<TableColumn>) -> Self {
        Self {
            title: title.map(Into::into),
            columns,
            rows: Vec::new(),
            footer: None,
        }
    }

    pub fn add_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn set_footer<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.footer = Some(cells.into_iter().map(Into::into).collect());
    }

    /// Column widths wide enough for the header and every cell.
    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                self.rows
                    .iter()
                    .chain(self.footer.iter())
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .chain([column.header.chars().count(), column.min_width])
                    .max()
                    .unwrap_or(column.min_width)
            })
            .collect()
    }
}

/// Renders [`Table`] instances as padded plain-text columns.
pub struct TableRenderer;

impl TableRenderer {
    pub fn render(table: &Table, plain: bool) -> String {
        let widths = table.widths();
        let total_width = widths.iter().map(|width| width + 1).sum::<usize>().max(1);
        let rule = "-".repeat(total_width);
        let mut out = String::new();

        if let Some(title) = &table.title {
            let title = if plain {
                title.clone()
            } else {
                title.bold().to_string()
            };
            out.push_str(&title);
            out.push('\n');
        }

        let header = Self::line(
            table.columns.iter().map(|column| column.header.as_str()),
            &table.columns,
            &widths,
        );
        out.push_str(&header);
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');

        for row in &table.rows {
            out.push_str(&Self::line(row.iter().map(String::as_str), &table.columns, &widths));
            out.push('\n');
        }

        if let Some(footer) = &table.footer {
            out.push_str(&rule);
            out.push('\n');
            out.push_str(&Self::line(footer.iter().map(String::as_str), &table.columns, &widths));
            out.push('\n');
        }
        out
    }

    fn line<'a>(
        cells: impl Iterator<Item = &'a str>,
        columns: &[TableColumn],
        widths: &[usize],
    ) -> String {
        let mut cells = cells;
        let rendered: Vec<String> = columns
            .iter()
            .zip(widths)
            .map(|(column, width)| {
                let cell = cells.next().unwrap_or("");
                let pad = width.saturating_sub(cell.chars().count());
                match column.align {
                    Align::Left => format!("{cell}{}", " ".repeat(pad)),
                    Align::Right => format!("{}{cell}", " ".repeat(pad)),
                }
            })
            .collect();
        rendered.join(" ").trim_end().to_string()
    }
}
