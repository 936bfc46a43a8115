use crate::PDFError;
use pdf_writer::Ref;
use std::collections::HashMap;

#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum RefType {
    Catalog,
    Info,
    PageTree,
    Page(usize),
    ContentForPage(usize),
    Font(usize),
    CidFont(usize),
    FontDescriptor(usize),
    FontData(usize),
    ToUnicode(usize),
}

/// Hands out PDF object ids and remembers which object each one was generated for
pub struct ObjectReferences {
    refs: HashMap<RefType, Ref>,
    next_id: i32,
}

impl ObjectReferences {
    pub fn new() -> ObjectReferences {
        ObjectReferences {
            refs: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn gen(&mut self, ref_type: RefType) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        self.refs.insert(ref_type, id);
        id
    }

    pub fn get(&self, ref_type: RefType) -> Option<Ref> {
        self.refs.get(&ref_type).copied()
    }

    /// Like [ObjectReferences::get], for objects that must have been generated already
    pub fn require(&self, ref_type: RefType) -> Result<Ref, PDFError> {
        self.get(ref_type).ok_or_else(|| {
            PDFError::DocumentSave(format!("no object was generated for {ref_type:?}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_and_remembered() {
        let mut refs = ObjectReferences::new();
        let catalog = refs.gen(RefType::Catalog);
        let page = refs.gen(RefType::Page(0));
        assert_eq!(catalog.get() + 1, page.get());
        assert_eq!(refs.get(RefType::Page(0)), Some(page));
        assert!(refs.require(RefType::Page(1)).is_err());
    }
}
