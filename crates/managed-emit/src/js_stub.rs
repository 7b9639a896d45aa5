//! Renders `index.<js>` (spec.md §6): a runtime stub. The declarations are
//! purely structural -- "the binding runtime is supplied by a downstream
//! compiler" (spec.md §1) -- so every export here is a thrown-on-touch
//! `Proxy`, not a real implementation.

pub fn render_namespace(namespace: &str) -> String {
    format!(
        "// Runtime stub for namespace \"{namespace}\".\n\
         // The binding runtime is supplied by a downstream compiler; this\n\
         // module exists only so a plain JS import of the declaration surface\n\
         // resolves, and fails loudly if anything is actually called.\n\
         const unimplemented = new Proxy({{}}, {{\n\
         \u{20}\u{20}get(_target, property) {{\n\
         \u{20}\u{20}\u{20}\u{20}throw new Error(`${{String(property)}} has no runtime binding`);\n\
         \u{20}\u{20}}},\n\
         }});\n\
         \n\
         module.exports = unimplemented;\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_throws_on_any_access() {
        let out = render_namespace("App.Models");
        assert!(out.contains("App.Models"));
        assert!(out.contains("throw new Error"));
    }
}
