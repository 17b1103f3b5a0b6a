//! Collection Query Engine
//!
//! Every operation re-queries the page: nothing is cached between calls, so
//! results follow the live document.

use std::cmp::Ordering;

use crate::{Conditions, Config, Error, MappedType, Matcher, Page, Record, Result};

/// Short-lived query view of one mapped type over one page
pub struct Collection<'a, P: Page> {
    ty: &'a MappedType,
    page: &'a P,
    config: Config,
}

impl<'a, P: Page> Collection<'a, P> {
    pub fn new(ty: &'a MappedType, page: &'a P, config: Config) -> Self {
        Self { ty, page, config }
    }

    /// Replace the runtime configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn root_selector(&self) -> Result<&'a str> {
        self.ty.root_selector()
    }

    fn record(&self, node: P::Element) -> Record<'a, P> {
        Record::new(self.page, node, self.ty, self.config)
    }

    fn records_matching(&self, selector: &str) -> Result<Vec<Record<'a, P>>> {
        let nodes = self.page.query_all(None, selector)?;
        tracing::debug!("{}: {:?} matched {} elements", self.ty.name(), selector, nodes.len());
        Ok(nodes.into_iter().map(|node| self.record(node)).collect())
    }

    /// Number of elements currently matching the root selector
    pub fn count(&self) -> Result<usize> {
        let selector = self.root_selector()?;
        Ok(self.page.query_all(None, selector)?.len())
    }

    /// One record per matching element, in document order
    pub fn all(&self) -> Result<Vec<Record<'a, P>>> {
        let selector = self.root_selector()?;
        self.records_matching(selector)
    }

    /// Same as [`find`](Self::find)
    pub fn first(&self) -> Result<Option<Record<'a, P>>> {
        self.find()
    }

    /// Records accepted by `predicate`, in document order
    pub fn select<F>(&self, mut predicate: F) -> Result<Vec<Record<'a, P>>>
    where
        F: FnMut(&Record<'a, P>) -> bool,
    {
        let mut records = self.all()?;
        records.retain(|r| predicate(r));
        Ok(records)
    }

    /// Records stably sorted by `compare`
    pub fn sort<F>(&self, mut compare: F) -> Result<Vec<Record<'a, P>>>
    where
        F: FnMut(&Record<'a, P>, &Record<'a, P>) -> Ordering,
    {
        let mut records = self.all()?;
        records.sort_by(|a, b| compare(a, b));
        Ok(records)
    }

    /// First matching record
    pub fn find(&self) -> Result<Option<Record<'a, P>>> {
        let selector = self.root_selector()?;
        Ok(self.page.query_first(None, selector)?.map(|node| self.record(node)))
    }

    /// First element matching `selector` in place of the root selector
    pub fn find_with(&self, selector: &str) -> Result<Option<Record<'a, P>>> {
        self.root_selector()?;
        Ok(self.page.query_first(None, selector)?.map(|node| self.record(node)))
    }

    /// [`find`](Self::find), failing with the page's not-found error
    pub fn find_required(&self) -> Result<Record<'a, P>> {
        let selector = self.root_selector()?;
        self.find()?.ok_or_else(|| self.not_found(selector))
    }

    /// [`find_with`](Self::find_with), failing with the page's not-found error
    pub fn find_required_with(&self, selector: &str) -> Result<Record<'a, P>> {
        self.find_with(selector)?.ok_or_else(|| self.not_found(selector))
    }

    /// First record satisfying every condition
    pub fn find_by(&self, conditions: impl Into<Conditions>) -> Result<Option<Record<'a, P>>> {
        let conditions = conditions.into();
        for record in self.all()? {
            if self.satisfies(&record, &conditions)? {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    /// [`find_by`](Self::find_by), failing with the page's not-found error
    pub fn find_by_required(&self, conditions: impl Into<Conditions>) -> Result<Record<'a, P>> {
        let selector = self.root_selector()?;
        self.find_by(conditions)?.ok_or_else(|| self.not_found(selector))
    }

    /// Every record satisfying every condition, in document order
    pub fn filter_by(&self, conditions: impl Into<Conditions>) -> Result<Vec<Record<'a, P>>> {
        let conditions = conditions.into();
        let mut matched = Vec::new();
        for record in self.all()? {
            if self.satisfies(&record, &conditions)? {
                matched.push(record);
            }
        }
        Ok(matched)
    }

    /// First record whose `name` attribute matches
    ///
    /// `None` when the type never declared `name`.
    pub fn find_by_attribute(&self, name: &str, matcher: impl Into<Matcher>) -> Result<Option<Record<'a, P>>> {
        self.root_selector()?;
        if self.ty.position(name).is_none() {
            tracing::debug!("{} has no attribute {:?}", self.ty.name(), name);
            return Ok(None);
        }
        self.find_by(Conditions::new().and(name, matcher))
    }

    fn satisfies(&self, record: &Record<'a, P>, conditions: &Conditions) -> Result<bool> {
        for (name, matcher) in conditions.iter() {
            if self.ty.position(name).is_none() {
                return Ok(false);
            }
            if !matcher.matches(&record.get(name)?) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn not_found(&self, selector: &str) -> Error {
        Error::Page(self.page.element_not_found(selector))
    }
}

impl<P: Page> std::fmt::Debug for Collection<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("type", &self.ty.name())
            .field("config", &self.config)
            .finish()
    }
}
