use crate::models::target::{ContentObject, ContentTypeId, TargetRef};
use leptos::logging::log;
use std::collections::HashMap;
use std::sync::RwLock;

/// Resolves generic (type, id) references to the host application's content.
pub trait ContentRegistry: Send + Sync {
    fn resolve(&self, target: &TargetRef) -> Option<ContentObject>;

    fn type_of(&self, object: &ContentObject) -> ContentTypeId {
        object.target.content_type_id
    }
}

#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    objects: RwLock<HashMap<TargetRef, ContentObject>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_objects(objects: impl IntoIterator<Item = ContentObject>) -> Self {
        let registry = Self::new();
        for object in objects {
            registry.register(object);
        }
        registry
    }

    /// Builds a registry from a JSON array of content objects.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let objects: Vec<ContentObject> = serde_json::from_str(json)?;
        log!("[REGISTRY] Loaded {} content objects", objects.len());
        Ok(Self::with_objects(objects))
    }

    pub fn register(&self, object: ContentObject) {
        let mut objects = self.objects.write().unwrap_or_else(|e| e.into_inner());
        objects.insert(object.target, object);
    }

    pub fn len(&self) -> usize {
        self.objects.read().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ContentRegistry for InMemoryRegistry {
    fn resolve(&self, target: &TargetRef) -> Option<ContentObject> {
        let objects = self.objects.read().unwrap_or_else(|e| e.into_inner());
        objects.get(target).cloned()
    }
}
