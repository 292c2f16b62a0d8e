use std::collections::HashMap;
use crate::api::error::SceneError;
use crate::api::types::{Category, ObjectId};
use crate::components::object::SceneObject;

/// Authoritative, ordered list of scene objects.
/// Built once from the manifest; no runtime insertion or removal.
pub struct SceneRegistry {
    objects: Vec<SceneObject>,
    index: HashMap<ObjectId, usize>,
}

impl SceneRegistry {
    /// Build the registry, enforcing id uniqueness and basic sanity.
    pub fn new(objects: Vec<SceneObject>) -> Result<Self, SceneError> {
        if objects.is_empty() {
            return Err(SceneError::EmptyManifest);
        }
        let mut index = HashMap::with_capacity(objects.len());
        for (i, obj) in objects.iter().enumerate() {
            if obj.label.trim().is_empty() {
                return Err(SceneError::EmptyLabel(obj.id));
            }
            if !obj.base_position.is_finite() || !obj.animation_phase.is_finite() {
                return Err(SceneError::NonFinitePosition(obj.id));
            }
            if index.insert(obj.id, i).is_some() {
                return Err(SceneError::DuplicateObjectId(obj.id));
            }
        }
        Ok(Self { objects, index })
    }

    /// Get an object by id.
    pub fn get_by_id(&self, id: ObjectId) -> Option<&SceneObject> {
        self.index.get(&id).map(|&i| &self.objects[i])
    }

    pub(crate) fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        match self.index.get(&id) {
            Some(&i) => self.objects.get_mut(i),
            None => None,
        }
    }

    /// Position of an object in manifest order.
    pub fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Visit every object in manifest order.
    pub fn for_each(&self, mut visit: impl FnMut(&SceneObject)) {
        for obj in &self.objects {
            visit(obj);
        }
    }

    /// Iterate over all objects in manifest order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    /// All objects of one category.
    pub fn of_category(&self, category: Category) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(move |o| o.category == category)
    }

    /// Find the first object with the given label.
    #[cfg(test)]
    pub fn find_by_label(&self, label: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.label == label)
    }

    /// Number of objects in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Always false for a constructed registry.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn rack(id: u32, label: &str) -> SceneObject {
        SceneObject::new(ObjectId(id), Category::ServerRack, Vec3::ZERO, label)
    }

    #[test]
    fn lookup_by_id_and_label() {
        let reg = SceneRegistry::new(vec![rack(1, "A"), rack(2, "B")]).unwrap();
        assert_eq!(reg.get_by_id(ObjectId(2)).unwrap().label, "B");
        assert_eq!(reg.find_by_label("A").unwrap().id, ObjectId(1));
        assert!(reg.get_by_id(ObjectId(9)).is_none());
        assert_eq!(reg.index_of(ObjectId(2)), Some(1));
    }

    #[test]
    fn duplicate_id_fails_fast() {
        let err = SceneRegistry::new(vec![rack(1, "A"), rack(1, "B")]).err().unwrap();
        assert!(matches!(err, SceneError::DuplicateObjectId(ObjectId(1))));
    }

    #[test]
    fn empty_label_and_nan_rejected() {
        assert!(matches!(
            SceneRegistry::new(vec![rack(1, "  ")]),
            Err(SceneError::EmptyLabel(_))
        ));
        let bad = SceneObject::new(ObjectId(3), Category::Database, Vec3::new(f32::NAN, 0.0, 0.0), "X");
        assert!(matches!(
            SceneRegistry::new(vec![bad]),
            Err(SceneError::NonFinitePosition(_))
        ));
        assert!(matches!(SceneRegistry::new(Vec::new()), Err(SceneError::EmptyManifest)));
    }

    #[test]
    fn for_each_preserves_order() {
        let reg = SceneRegistry::new(vec![rack(3, "C"), rack(1, "A"), rack(2, "B")]).unwrap();
        let mut seen = Vec::new();
        reg.for_each(|o| seen.push(o.id.0));
        assert_eq!(seen, vec![3, 1, 2]);
        assert_eq!(reg.of_category(Category::ServerRack).count(), 3);
    }
}
