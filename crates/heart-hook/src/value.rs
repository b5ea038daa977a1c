use glam::Vec2;
use std::any::Any;
use std::fmt;

/// A host object on the evaluation stack, tagged with its type name.
pub struct Object {
    type_name: String,
    inner: Box<dyn Any + Send>,
}

impl Object {
    pub fn new<T: Any + Send>(type_name: impl Into<String>, value: T) -> Self {
        Self { type_name: type_name.into(), inner: Box::new(value) }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.inner.downcast_mut()
    }

    /// Take the value out, or get the object back unchanged on a type mismatch.
    pub fn downcast<T: Any>(self) -> Result<T, Object> {
        match self.inner.downcast::<T>() {
            Ok(v) => Ok(*v),
            Err(inner) => Err(Object { type_name: self.type_name, inner }),
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({})", self.type_name)
    }
}

/// One evaluation-stack slot.
#[derive(Debug)]
pub enum Value {
    Null,
    Int(i32),
    Float(f32),
    Vector(Vec2),
    /// Host entity handle.
    Entity(u64),
    Object(Object),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Vector(_) => "vector",
            Value::Entity(_) => "entity",
            Value::Object(_) => "object",
        }
    }

    /// Copy a plain value. Objects are owned by exactly one slot and are
    /// never copied.
    pub fn try_clone(&self) -> Option<Value> {
        Some(match self {
            Value::Null => Value::Null,
            Value::Int(v) => Value::Int(*v),
            Value::Float(v) => Value::Float(*v),
            Value::Vector(v) => Value::Vector(*v),
            Value::Entity(v) => Value::Entity(*v),
            Value::Object(_) => return None,
        })
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<Vec2> {
        match self {
            Value::Vector(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<u64> {
        match self {
            Value::Entity(v) => Some(*v),
            _ => None,
        }
    }

    pub fn into_object(self) -> Option<Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Type name of an object value.
    pub fn object_type(&self) -> Option<&str> {
        match self {
            Value::Object(o) => Some(o.type_name()),
            _ => None,
        }
    }
}
