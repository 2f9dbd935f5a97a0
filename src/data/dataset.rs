use crate::error::TreeError;
use crate::metrics::impurity::majority_label;
use crate::trees::node::format_threshold;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fmt::{self, Debug, Formatter};

/// How an attribute's values are compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    /// Compared by equality.
    Categorical,
    /// Compared by ordering; every cell parsed as a finite number.
    Continuous,
}

/// A named candidate split attribute.
#[derive(Clone, Debug)]
pub struct Attribute {
    name: String,
    cells: Vec<String>,
    numbers: Option<Vec<f64>>,
    integral: bool,
}

impl Attribute {
    fn new(name: String, cells: Vec<String>) -> Self {
        let numbers = cells
            .iter()
            .map(|cell| cell.parse::<f64>().ok().filter(|value| value.is_finite()))
            .collect::<Option<Vec<_>>>();
        let integral = numbers.is_some() && cells.iter().all(|cell| cell.parse::<i64>().is_ok());
        Self {
            name,
            cells,
            numbers,
            integral,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AttributeKind {
        match self.numbers {
            Some(_) => AttributeKind::Continuous,
            None => AttributeKind::Categorical,
        }
    }

    pub fn is_continuous(&self) -> bool {
        self.kind() == AttributeKind::Continuous
    }

    /// Raw cell text at `row`.
    pub fn cell(&self, row: usize) -> &str {
        &self.cells[row]
    }

    /// Numeric value at `row`, for continuous attributes only.
    pub fn number(&self, row: usize) -> Option<f64> {
        self.numbers.as_ref().map(|numbers| numbers[row])
    }

    /// The value at `row` as a multiway branch key.
    ///
    /// Categorical cells are used verbatim. Numeric cells are keyed by value,
    /// so `1` and `1.0` coincide: integer columns print as integers, other
    /// numeric columns in threshold form (`1.0`, `2.5`).
    pub fn value_key(&self, row: usize) -> Cow<'_, str> {
        let cell = self.cell(row);
        match self.number(row) {
            None => Cow::Borrowed(cell),
            Some(_) if self.integral => match cell.parse::<i64>() {
                Ok(value) => Cow::Owned(value.to_string()),
                Err(_) => Cow::Borrowed(cell),
            },
            // adding zero folds -0.0 into 0.0
            Some(value) => Cow::Owned(format_threshold(value + 0.0)),
        }
    }
}

/// An immutable table of attribute columns plus one target column.
///
/// Class labels are interned in order of first appearance, so `label(row)`
/// is an index into `classes()`.
pub struct Dataset {
    attributes: Vec<Attribute>,
    target_name: String,
    classes: Vec<String>,
    labels: Vec<usize>,
}

impl Debug for Dataset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Dataset {{\n    columns: [")?;
        for attribute in &self.attributes {
            write!(f, "{} ({:?}), ", attribute.name, attribute.kind())?;
        }
        writeln!(f, "],")?;
        write!(f, "    target: {},\n    classes: [", self.target_name)?;
        for class in &self.classes {
            write!(f, "{}, ", class)?;
        }
        write!(f, "],\n    rows: {}\n}}", self.n_rows())
    }
}

impl Dataset {
    /// Builds a dataset from a header and row-major cells.
    ///
    /// # Errors
    ///
    /// | Variant | When |
    /// |---|---|
    /// | [`TreeError::EmptyHeader`] | `header` is empty |
    /// | [`TreeError::DuplicateColumn`] | a column name repeats |
    /// | [`TreeError::MissingTargetColumn`] | `target` is not in `header` |
    /// | [`TreeError::InconsistentRowLength`] | a row is not as wide as `header` |
    /// | [`TreeError::EmptyDataset`] | `rows` is empty |
    pub fn from_records(
        header: Vec<String>,
        rows: Vec<Vec<String>>,
        target: &str,
    ) -> Result<Self, TreeError> {
        if header.is_empty() {
            return Err(TreeError::EmptyHeader);
        }
        let mut seen = HashSet::new();
        for name in &header {
            if !seen.insert(name.as_str()) {
                return Err(TreeError::DuplicateColumn { name: name.clone() });
            }
        }
        let target_index = header
            .iter()
            .position(|name| name == target)
            .ok_or_else(|| TreeError::MissingTargetColumn {
                target: target.to_string(),
            })?;
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != header.len() {
                return Err(TreeError::InconsistentRowLength {
                    row,
                    expected: header.len(),
                    got: cells.len(),
                });
            }
        }
        if rows.is_empty() {
            return Err(TreeError::EmptyDataset);
        }

        let mut columns: Vec<Vec<String>> = header
            .iter()
            .map(|_| Vec::with_capacity(rows.len()))
            .collect();
        for cells in rows {
            for (column, cell) in columns.iter_mut().zip(cells) {
                column.push(cell);
            }
        }

        let mut classes = Vec::new();
        let mut class_ids: HashMap<String, usize> = HashMap::new();
        let mut labels = Vec::new();
        let mut attributes = Vec::with_capacity(header.len() - 1);
        for (index, (name, cells)) in header.into_iter().zip(columns).enumerate() {
            if index != target_index {
                attributes.push(Attribute::new(name, cells));
                continue;
            }
            for cell in cells {
                let id = *class_ids.entry(cell.clone()).or_insert_with(|| {
                    classes.push(cell);
                    classes.len() - 1
                });
                labels.push(id);
            }
        }

        Ok(Self {
            attributes,
            target_name: target.to_string(),
            classes,
            labels,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.labels.len()
    }

    pub fn n_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn attribute(&self, index: usize) -> &Attribute {
        &self.attributes[index]
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn index_of_attribute(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|attr| attr.name == name)
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Distinct class labels in order of first appearance.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn class_name(&self, class: usize) -> &str {
        &self.classes[class]
    }

    /// Interned class of `row`.
    pub fn label(&self, row: usize) -> usize {
        self.labels[row]
    }

    /// A view over every row.
    pub fn view(&self) -> DatasetView<'_> {
        DatasetView {
            dataset: self,
            rows: (0..self.n_rows()).collect(),
        }
    }
}

/// A subset of a [`Dataset`]'s rows, stored as row indices in source order.
#[derive(Clone)]
pub struct DatasetView<'a> {
    dataset: &'a Dataset,
    rows: Vec<usize>,
}

impl Debug for DatasetView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DatasetView {{ rows: {:?} }}", self.rows)
    }
}

impl<'a> DatasetView<'a> {
    pub fn new(dataset: &'a Dataset, rows: Vec<usize>) -> Self {
        Self { dataset, rows }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().map(|&row| self.dataset.label(row))
    }

    /// Per-class counts indexed by interned class.
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.dataset.n_classes()];
        for label in self.labels() {
            counts[label] += 1;
        }
        counts
    }

    /// The single class of a non-empty pure view.
    pub fn pure_label(&self) -> Option<usize> {
        let mut labels = self.labels();
        let first = labels.next()?;
        labels.all(|label| label == first).then_some(first)
    }

    pub fn majority_label(&self) -> Option<usize> {
        majority_label(self.labels())
    }

    /// Distinct cell values of `attribute`, in order of first appearance.
    pub fn distinct_values(&self, attribute: usize) -> Vec<&'a str> {
        let column = self.dataset.attribute(attribute);
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|&row| column.cell(row))
            .filter(|cell| seen.insert(*cell))
            .collect()
    }

    /// `(value, class)` pairs of a continuous attribute; empty for categorical ones.
    pub fn numeric_pairs(&self, attribute: usize) -> Vec<(f64, usize)> {
        let column = self.dataset.attribute(attribute);
        self.rows
            .iter()
            .filter_map(|&row| {
                column
                    .number(row)
                    .map(|value| (value, self.dataset.label(row)))
            })
            .collect()
    }

    /// One sub-view per distinct value of `attribute`, in order of first appearance.
    ///
    /// Groups are keyed by [`Attribute::value_key`].
    pub fn partition_by_value(&self, attribute: usize) -> Vec<(String, DatasetView<'a>)> {
        let column = self.dataset.attribute(attribute);
        let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
        let mut positions: HashMap<Cow<'a, str>, usize> = HashMap::new();
        for &row in &self.rows {
            let key = column.value_key(row);
            match positions.get(&key) {
                Some(&position) => groups[position].1.push(row),
                None => {
                    groups.push((key.to_string(), vec![row]));
                    positions.insert(key, groups.len() - 1);
                }
            }
        }
        groups
            .into_iter()
            .map(|(value, rows)| (value, DatasetView::new(self.dataset, rows)))
            .collect()
    }

    /// Rows with `attribute <= threshold` on the left, the rest on the right.
    ///
    /// Categorical attributes send every row right.
    pub fn split_on_threshold(
        &self,
        attribute: usize,
        threshold: f64,
    ) -> (DatasetView<'a>, DatasetView<'a>) {
        let column = self.dataset.attribute(attribute);
        self.partition(|row| column.number(row).is_some_and(|value| value <= threshold))
    }

    /// Rows whose `attribute` cell equals `value` on the left, the rest on the right.
    pub fn split_on_value(&self, attribute: usize, value: &str) -> (DatasetView<'a>, DatasetView<'a>) {
        let column = self.dataset.attribute(attribute);
        self.partition(|row| column.cell(row) == value)
    }

    fn partition<F>(&self, mut goes_left: F) -> (DatasetView<'a>, DatasetView<'a>)
    where
        F: FnMut(usize) -> bool,
    {
        let (left, right): (Vec<usize>, Vec<usize>) =
            self.rows.iter().partition(|&&row| goes_left(row));
        (
            DatasetView::new(self.dataset, left),
            DatasetView::new(self.dataset, right),
        )
    }
}
