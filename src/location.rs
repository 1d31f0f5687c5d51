/// Identifier of a source buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u32);

/// A byte offset inside a real source buffer.
///
/// Ordered by file, then offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileLoc {
    pub file: FileId,
    pub offset: u32,
}

impl FileLoc {
    pub fn new(file: FileId, offset: u32) -> Self {
        Self { file, offset }
    }
}

/// Handle to an entry in a [`SourceMap`]'s expansion table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacroLocId(usize);

/// A position as seen by the AST: either a direct file position or a
/// position produced by macro expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceLocation {
    /// Synthesized position with no backing buffer
    #[default]
    Invalid,
    File(FileLoc),
    Macro(MacroLocId),
}

impl SourceLocation {
    pub fn file(file: FileId, offset: u32) -> Self {
        SourceLocation::File(FileLoc::new(file, offset))
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, SourceLocation::Invalid)
    }

    pub fn is_macro(&self) -> bool {
        matches!(self, SourceLocation::Macro(_))
    }
}

/// Maps any position to the location its characters were actually spelled at.
pub trait LocationResolver {
    /// Strip every level of expansion indirection from `loc`.
    ///
    /// Returns `None` when the position cannot be resolved to a real buffer.
    fn spelling_loc(&self, loc: SourceLocation) -> Option<FileLoc>;
}

impl<R: LocationResolver + ?Sized> LocationResolver for &R {
    fn spelling_loc(&self, loc: SourceLocation) -> Option<FileLoc> {
        (**self).spelling_loc(loc)
    }
}

#[derive(Debug, Clone, Copy)]
struct MacroEntry {
    spelling: SourceLocation,
    expansion: SourceLocation,
}

/// Expansion table for one translation unit
#[derive(Debug, Default, Clone)]
pub struct SourceMap {
    entries: Vec<MacroEntry>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a position produced by expansion.
    ///
    /// `spelling` is where the token's characters come from (possibly another
    /// macro position, for nested expansions); `expansion` is the invocation
    /// site the token appears at.
    pub fn add_macro_loc(
        &mut self,
        spelling: SourceLocation,
        expansion: SourceLocation,
    ) -> SourceLocation {
        let id = MacroLocId(self.entries.len());
        self.entries.push(MacroEntry {
            spelling,
            expansion,
        });
        SourceLocation::Macro(id)
    }

    /// Resolve `loc` to the outermost invocation site it was expanded at.
    pub fn expansion_loc(&self, loc: SourceLocation) -> Option<FileLoc> {
        self.walk(loc, |entry| entry.expansion)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, id: MacroLocId) -> Option<&MacroEntry> {
        self.entries.get(id.0)
    }

    fn walk(
        &self,
        loc: SourceLocation,
        step: impl Fn(&MacroEntry) -> SourceLocation,
    ) -> Option<FileLoc> {
        let mut current = loc;
        // Each hop consumes one entry; more hops than entries means a cycle.
        for _ in 0..=self.entries.len() {
            match current {
                SourceLocation::Invalid => return None,
                SourceLocation::File(file_loc) => return Some(file_loc),
                SourceLocation::Macro(id) => current = step(self.entry(id)?),
            }
        }
        None
    }
}

impl LocationResolver for SourceMap {
    fn spelling_loc(&self, loc: SourceLocation) -> Option<FileLoc> {
        self.walk(loc, |entry| entry.spelling)
    }
}

/// Closed range of spelling positions, possibly spanning buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpellingRange {
    pub begin: FileLoc,
    pub end: FileLoc,
}

impl SpellingRange {
    pub fn new(begin: FileLoc, end: FileLoc) -> Self {
        Self { begin, end }
    }

    /// Resolve both edges through `resolver`, failing if either is unresolvable.
    pub fn resolve<R: LocationResolver + ?Sized>(
        resolver: &R,
        begin: SourceLocation,
        end: SourceLocation,
    ) -> Option<Self> {
        Some(Self::new(
            resolver.spelling_loc(begin)?,
            resolver.spelling_loc(end)?,
        ))
    }

    pub fn fully_contains(&self, loc: FileLoc) -> bool {
        self.begin <= loc && loc <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAIN: FileId = FileId(0);
    const HEADER: FileId = FileId(1);

    #[test]
    fn test_file_loc_resolves_to_itself() {
        let map = SourceMap::new();
        let loc = SourceLocation::file(MAIN, 42);
        assert_eq!(map.spelling_loc(loc), Some(FileLoc::new(MAIN, 42)));
        assert_eq!(map.expansion_loc(loc), Some(FileLoc::new(MAIN, 42)));
    }

    #[test]
    fn test_invalid_loc_is_unresolvable() {
        let map = SourceMap::new();
        assert!(!SourceLocation::Invalid.is_valid());
        assert_eq!(map.spelling_loc(SourceLocation::Invalid), None);
    }

    #[test]
    fn test_macro_loc_splits_coordinates() {
        let mut map = SourceMap::new();
        let loc = map.add_macro_loc(
            SourceLocation::file(HEADER, 7),
            SourceLocation::file(MAIN, 100),
        );
        assert!(loc.is_macro());
        assert_eq!(map.spelling_loc(loc), Some(FileLoc::new(HEADER, 7)));
        assert_eq!(map.expansion_loc(loc), Some(FileLoc::new(MAIN, 100)));
    }

    #[test]
    fn test_nested_expansion_strips_every_level() {
        // OUTER(x) expands to INNER(x), INNER's body token spelled in the header
        let mut map = SourceMap::new();
        let outer_site = SourceLocation::file(MAIN, 50);
        let inner_site = map.add_macro_loc(SourceLocation::file(HEADER, 20), outer_site);
        let body = map.add_macro_loc(SourceLocation::file(HEADER, 3), inner_site);
        let nested = map.add_macro_loc(body, inner_site);

        assert_eq!(map.spelling_loc(nested), Some(FileLoc::new(HEADER, 3)));
        assert_eq!(map.expansion_loc(nested), Some(FileLoc::new(MAIN, 50)));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_foreign_macro_loc_is_unresolvable() {
        let mut other = SourceMap::new();
        other.add_macro_loc(SourceLocation::file(MAIN, 1), SourceLocation::file(MAIN, 2));
        let foreign = other.add_macro_loc(
            SourceLocation::file(MAIN, 3),
            SourceLocation::file(MAIN, 4),
        );

        let map = SourceMap::new();
        assert!(map.is_empty());
        assert_eq!(map.spelling_loc(foreign), None);
    }

    #[test]
    fn test_cyclic_chain_is_unresolvable() {
        let mut map = SourceMap::new();
        // Entry 0 spells from entry 1, which does not exist yet
        let forward = SourceLocation::Macro(MacroLocId(1));
        let first = map.add_macro_loc(forward, SourceLocation::file(MAIN, 0));
        map.add_macro_loc(first, SourceLocation::file(MAIN, 0));

        assert_eq!(map.spelling_loc(first), None);
    }

    #[test]
    fn test_resolver_through_reference() {
        let mut map = SourceMap::new();
        let loc = map.add_macro_loc(SourceLocation::file(HEADER, 9), SourceLocation::Invalid);
        fn spell<R: LocationResolver>(resolver: R, loc: SourceLocation) -> Option<FileLoc> {
            resolver.spelling_loc(loc)
        }

        let by_ref: &dyn LocationResolver = &map;
        assert_eq!(spell(by_ref, loc), Some(FileLoc::new(HEADER, 9)));
        assert_eq!(map.expansion_loc(loc), None);
    }

    #[test]
    fn test_range_containment_is_closed() {
        let range = SpellingRange::new(FileLoc::new(MAIN, 10), FileLoc::new(MAIN, 20));
        assert!(range.fully_contains(FileLoc::new(MAIN, 10)));
        assert!(range.fully_contains(FileLoc::new(MAIN, 15)));
        assert!(range.fully_contains(FileLoc::new(MAIN, 20)));
        assert!(!range.fully_contains(FileLoc::new(MAIN, 9)));
        assert!(!range.fully_contains(FileLoc::new(MAIN, 21)));
        assert!(!range.fully_contains(FileLoc::new(HEADER, 15)));
    }

    #[test]
    fn test_range_across_files_contains_its_edges() {
        let range = SpellingRange::new(FileLoc::new(MAIN, 5), FileLoc::new(HEADER, 9));
        assert!(range.fully_contains(range.begin));
        assert!(range.fully_contains(range.end));
        assert!(range.fully_contains(FileLoc::new(MAIN, 400)));
        assert!(range.fully_contains(FileLoc::new(HEADER, 0)));
        assert!(!range.fully_contains(FileLoc::new(MAIN, 4)));
        assert!(!range.fully_contains(FileLoc::new(HEADER, 10)));
        assert!(!range.fully_contains(FileLoc::new(FileId(2), 0)));
    }

    #[test]
    fn test_range_resolve() {
        let mut map = SourceMap::new();
        let begin = map.add_macro_loc(
            SourceLocation::file(HEADER, 2),
            SourceLocation::file(MAIN, 0),
        );
        let range = SpellingRange::resolve(&map, begin, SourceLocation::file(HEADER, 8)).unwrap();
        assert_eq!(range.begin, FileLoc::new(HEADER, 2));
        assert_eq!(range.end, FileLoc::new(HEADER, 8));

        assert!(SpellingRange::resolve(&map, begin, SourceLocation::Invalid).is_none());
    }
}
