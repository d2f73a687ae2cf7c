use crate::device::UniformType;

/// Reflected description of one active uniform.
///
/// `L` is the backend's uniform-location handle. `location` is `None` when the
/// backend reports no location for the name; writes to it are then dropped by
/// the backend, matching GL's handling of location `-1`.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformDescriptor<L> {
    pub name: String,
    /// Declared array size (1 for non-arrays).
    pub size: i32,
    pub ty: UniformType,
    pub location: Option<L>,
}

/// Ordered name → descriptor mapping.
///
/// Iteration order is the reflection order (ascending active-uniform index).
/// Names are unique; the set stays small enough that lookups are linear.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorSet<L> {
    entries: Vec<UniformDescriptor<L>>,
}

impl<L> Default for DescriptorSet<L> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<L> DescriptorSet<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `descriptor`. Returns `false` (and keeps the existing entry) on a duplicate name.
    pub(crate) fn insert(&mut self, descriptor: UniformDescriptor<L>) -> bool {
        if self.contains(&descriptor.name) {
            return false;
        }
        self.entries.push(descriptor);
        true
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&UniformDescriptor<L>> {
        self.entries.iter().find(|d| d.name == name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, UniformDescriptor<L>> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|d| d.name.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, L> IntoIterator for &'a DescriptorSet<L> {
    type Item = &'a UniformDescriptor<L>;
    type IntoIter = std::slice::Iter<'a, UniformDescriptor<L>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(name: &str, ty: UniformType) -> UniformDescriptor<u32> {
        UniformDescriptor { name: name.to_string(), size: 1, ty, location: Some(0) }
    }

    #[test]
    fn keeps_insertion_order() {
        let mut set = DescriptorSet::new();
        set.insert(d("uB", UniformType::FloatVec4));
        set.insert(d("uA", UniformType::FloatMat4));
        assert_eq!(set.names().collect::<Vec<_>>(), ["uB", "uA"]);
    }

    #[test]
    fn duplicate_name_is_refused() {
        let mut set = DescriptorSet::new();
        assert!(set.insert(d("uA", UniformType::FloatVec4)));
        assert!(!set.insert(d("uA", UniformType::FloatMat4)));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("uA").unwrap().ty, UniformType::FloatVec4);
    }
}
