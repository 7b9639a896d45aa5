//! The symbol graph (spec.md §3): a set of namespace symbols plus two
//! derived indexes. Rebuilt after any structural pass. The graph
//! exclusively owns its namespaces; all other references are by stable id.

use crate::ids::TypeStableId;
use crate::namespace::NamespaceSymbol;
use crate::type_symbol::TypeSymbol;
use indexmap::IndexMap;

#[derive(Clone, Debug, Default)]
pub struct SymbolGraph {
    namespaces: IndexMap<String, NamespaceSymbol>,
    types: IndexMap<TypeStableId, TypeSymbol>,
}

impl SymbolGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn namespace_by_name(&self, name: &str) -> Option<&NamespaceSymbol> {
        self.namespaces.get(name)
    }

    pub fn namespace_by_name_mut(&mut self, name: &str) -> Option<&mut NamespaceSymbol> {
        self.namespaces.get_mut(name)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &NamespaceSymbol> {
        self.namespaces.values()
    }

    /// Namespaces sorted alphabetically (determinism, §5 / §4.6).
    pub fn namespaces_sorted(&self) -> Vec<&NamespaceSymbol> {
        let mut out: Vec<_> = self.namespaces.values().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    pub fn ensure_namespace(&mut self, name: &str) -> &mut NamespaceSymbol {
        self.namespaces
            .entry(name.to_string())
            .or_insert_with(|| NamespaceSymbol::new(name))
    }

    pub fn type_by_stable_id(&self, id: &TypeStableId) -> Option<&TypeSymbol> {
        self.types.get(id)
    }

    pub fn type_by_stable_id_mut(&mut self, id: &TypeStableId) -> Option<&mut TypeSymbol> {
        self.types.get_mut(id)
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeSymbol> {
        self.types.values()
    }

    pub fn types_mut(&mut self) -> impl Iterator<Item = &mut TypeSymbol> {
        self.types.values_mut()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Insert a type, attaching it to the given namespace. Returns an
    /// error string if the stable id already exists (INT_001).
    pub fn insert_type(&mut self, namespace: &str, type_symbol: TypeSymbol) -> Result<(), String> {
        let id = type_symbol.stable_id.clone();
        if self.types.contains_key(&id) {
            return Err(format!("duplicate type stable id {id}"));
        }
        self.ensure_namespace(namespace).types.push(id.clone());
        self.types.insert(id, type_symbol);
        Ok(())
    }

    pub fn remove_type(&mut self, namespace: &str, id: &TypeStableId) -> Option<TypeSymbol> {
        if let Some(ns) = self.namespaces.get_mut(namespace) {
            ns.types.retain(|t| t != id);
        }
        self.types.shift_remove(id)
    }

    /// Types sorted by the final emission order key of §4.6: kind rank,
    /// then final target name (falling back to CLR name pre-rename), then
    /// arity.
    pub fn types_in_namespace_emit_order(&self, namespace: &str) -> Vec<&TypeSymbol> {
        let Some(ns) = self.namespace_by_name(namespace) else {
            return Vec::new();
        };
        let mut out: Vec<&TypeSymbol> = ns.types.iter().filter_map(|id| self.type_by_stable_id(id)).collect();
        out.sort_by(|a, b| {
            a.kind
                .emit_order_rank()
                .cmp(&b.kind.emit_order_rank())
                .then_with(|| {
                    let name_a = a.target_emit_name.as_deref().unwrap_or(a.stable_id.clr_full_name());
                    let name_b = b.target_emit_name.as_deref().unwrap_or(b.stable_id.clr_full_name());
                    name_a.cmp(name_b)
                })
                .then_with(|| a.arity().cmp(&b.arity()))
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_symbol::TypeKind;

    #[test]
    fn insert_rejects_duplicate_stable_id() {
        let mut graph = SymbolGraph::new();
        let id = TypeStableId::new("asm", "Foo");
        graph.insert_type("Ns", TypeSymbol::new(id.clone(), TypeKind::Class)).unwrap();
        let err = graph.insert_type("Ns", TypeSymbol::new(id, TypeKind::Class)).unwrap_err();
        assert!(err.contains("duplicate"));
    }

    #[test]
    fn emit_order_is_kind_then_name_then_arity() {
        let mut graph = SymbolGraph::new();
        let mut cls = TypeSymbol::new(TypeStableId::new("asm", "Z"), TypeKind::Class);
        cls.target_emit_name = Some("Z".into());
        let mut iface = TypeSymbol::new(TypeStableId::new("asm", "IA"), TypeKind::Interface);
        iface.target_emit_name = Some("IA".into());
        graph.insert_type("Ns", cls).unwrap();
        graph.insert_type("Ns", iface).unwrap();
        let ordered = graph.types_in_namespace_emit_order("Ns");
        assert_eq!(ordered[0].stable_id.clr_full_name(), "IA");
        assert_eq!(ordered[1].stable_id.clr_full_name(), "Z");
    }
}
