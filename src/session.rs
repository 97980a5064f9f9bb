//! Session state: the live point set and the current clustering.
//!
//! A [`Dataset`] owns an ordered list of points and the groups of the latest
//! clustering run. Adding or removing a point clears the groups (centroids no
//! longer describe the data) together with every point's group index.
//! Classifying a new point keeps the groups: the point joins the existing
//! partition.
//!
//! Every mutating operation either succeeds completely or returns an error with
//! the dataset untouched.

use crate::cluster::{classify, Clustering, Group, Kmeans, Palette, DEFAULT_MAX_ITER, DEFAULT_SEED};
use crate::error::{Error, Result};
use crate::geometry::{Coord, Point};
use crate::neighbors::{k_nearest, DistanceResult};
use tracing::debug;

/// Session configuration.
#[derive(Clone, Debug)]
pub struct SessionParams {
    /// Seed for k-means++ seeding.
    pub seed: u64,

    /// Iteration cap for Lloyd rounds.
    pub max_iter: usize,

    /// Group symbols. Its length is the largest `k` a session accepts.
    pub palette: Palette,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            max_iter: DEFAULT_MAX_ITER,
            palette: Palette::default(),
        }
    }
}

/// One row of the point listing.
#[derive(Clone, Debug, PartialEq)]
pub struct PointRow<'a> {
    /// Point name.
    pub name: &'a str,
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
    /// `G-<n>` label of the point's group, if grouped.
    pub group_label: Option<String>,
}

/// A group together with its member count.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupSummary<'a> {
    /// Index into the group set.
    pub index: usize,
    /// The group itself.
    pub group: &'a Group,
    /// Number of points currently assigned to the group.
    pub members: usize,
}

/// The 15-point, three-cluster demo dataset.
pub const DEMO_POINTS: [(&str, f64, f64); 15] = [
    ("A1", -7.0, 5.0),
    ("A2", -6.0, 4.0),
    ("A3", -8.0, 6.0),
    ("A4", -5.0, 5.0),
    ("B1", 1.0, 1.0),
    ("B2", 2.0, 2.0),
    ("B3", 0.0, 0.0),
    ("B4", 1.0, -1.0),
    ("B5", 3.0, 1.0),
    ("C1", 6.0, -5.0),
    ("C2", 7.0, -4.0),
    ("C3", 5.0, -6.0),
    ("C4", 8.0, -5.0),
    ("C5", 6.0, -3.0),
    ("C6", 7.0, -6.0),
];

/// Points plus the groups of the latest clustering run.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    params: SessionParams,
    points: Vec<Point>,
    groups: Vec<Group>,
}

impl Dataset {
    /// Create an empty dataset with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty dataset with the given parameters.
    pub fn with_params(params: SessionParams) -> Self {
        Self {
            params,
            points: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Live points in insertion order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Current groups (empty when no clustering reflects the points).
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Number of live points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the dataset holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Look up a point by name, ignoring surrounding whitespace.
    pub fn point(&self, name: &str) -> Option<&Point> {
        let name = name.trim();
        self.points.iter().find(|p| p.name == name)
    }

    /// Largest `k` accepted by [`Dataset::run_clustering`].
    pub fn max_clusters(&self) -> usize {
        self.points.len().min(self.params.palette.len())
    }

    /// Add an ungrouped point. Clears the current clustering.
    pub fn add_point(&mut self, name: &str, x: f64, y: f64) -> Result<()> {
        let point = self.new_point(name, x, y)?;
        debug!(name = %point.name, x, y, "adding point");
        self.points.push(point);
        self.invalidate();
        Ok(())
    }

    /// Remove a point by name. Clears the current clustering.
    pub fn remove_point(&mut self, name: &str) -> Result<Point> {
        let idx = self
            .index_of(name.trim())
            .ok_or_else(|| Error::NotFound(name.trim().to_string()))?;
        let removed = self.points.remove(idx);
        debug!(name = %removed.name, "removed point");
        self.invalidate();
        Ok(removed)
    }

    /// Replace the groups with a fresh k-means run over all points.
    pub fn run_clustering(&mut self, k: usize) -> Result<&[Group]> {
        let max = self.max_clusters();
        if k == 0 || k > max {
            return Err(Error::InvalidClusterCount { requested: k, max });
        }

        let model = Kmeans::new(k)
            .with_seed(self.params.seed)
            .with_max_iter(self.params.max_iter)
            .with_palette(self.params.palette.clone());

        // Fit on a copy so a rejected run leaves the session as it was.
        let mut points = self.points.clone();
        let groups = model.fit(&mut points)?;
        self.points = points;
        self.groups = groups;
        debug!(k, n = self.points.len(), "clustering replaced");
        Ok(&self.groups)
    }

    /// Create a point, attach it to the nearest existing group and append it.
    ///
    /// Returns the assigned group index. The groups are kept as they are.
    pub fn classify_and_insert(&mut self, name: &str, x: f64, y: f64) -> Result<usize> {
        if self.groups.is_empty() {
            return Err(Error::NoClustering);
        }
        let mut point = self.new_point(name, x, y)?;
        let group = classify(&point, &self.groups)?;
        point.group = Some(group);
        debug!(name = %point.name, group, "classified point");
        self.points.push(point);
        Ok(group)
    }

    /// Euclidean distance between two named points.
    pub fn distance_between(&self, a: &str, b: &str) -> Result<f64> {
        let pa = self.require(a)?;
        let pb = self.require(b)?;
        Ok(crate::geometry::distance(pa, pb))
    }

    /// The `k` nearest other points to the named point. `k` is raised to 1 if 0.
    pub fn nearest(&self, name: &str, k: usize) -> Result<Vec<DistanceResult>> {
        let query = self.require(name)?;
        Ok(k_nearest(query, &self.points, k.max(1)))
    }

    /// Listing view: one row per point, in insertion order.
    pub fn rows(&self) -> Vec<PointRow<'_>> {
        self.points
            .iter()
            .map(|p| PointRow {
                name: &p.name,
                x: p.x,
                y: p.y,
                group_label: p.group.map(Group::short_label),
            })
            .collect()
    }

    /// Each current group with its member count.
    pub fn group_summaries(&self) -> Vec<GroupSummary<'_>> {
        self.groups
            .iter()
            .enumerate()
            .map(|(index, group)| GroupSummary {
                index,
                group,
                members: self.points.iter().filter(|p| p.group == Some(index)).count(),
            })
            .collect()
    }

    /// Drop all points and groups.
    pub fn clear(&mut self) {
        self.points.clear();
        self.groups.clear();
    }

    /// Replace the contents with [`DEMO_POINTS`].
    pub fn load_demo(&mut self) {
        self.clear();
        self.points = DEMO_POINTS
            .iter()
            .map(|&(name, x, y)| Point::new(name, x, y))
            .collect();
    }

    fn require(&self, name: &str) -> Result<&Point> {
        let name = name.trim();
        self.point(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.points.iter().position(|p| p.name == name)
    }

    /// Validate a would-be point without touching the dataset.
    fn new_point(&self, name: &str, x: f64, y: f64) -> Result<Point> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("point name must not be empty".into()));
        }
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::InvalidInput(format!(
                "coordinates of {name:?} must be finite, got {}",
                Coord::new(x, y)
            )));
        }
        if self.index_of(name).is_some() {
            return Err(Error::DuplicateName(name.to_string()));
        }
        Ok(Point::new(name, x, y))
    }

    fn invalidate(&mut self) {
        if !self.groups.is_empty() {
            debug!(groups = self.groups.len(), "clustering invalidated");
        }
        self.groups.clear();
        for p in &mut self.points {
            p.group = None;
        }
    }
}
