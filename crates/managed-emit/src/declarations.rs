//! Renders `internal/index.<decl>` (spec.md §6): the namespace's full
//! declaration surface -- every type the namespace owns, with class and
//! static surfaces in one class body, companion view interfaces merged in
//! by declaration merging, and indexers converted to index signatures.

use crate::primitives::{BRANDED_NUMERICS, CHAR_SUPPORT_ALIAS};
use crate::type_printer::NamespacePrinter;
use crate::writer::IndentWriter;
use clrbind_common::error::BuildResult;
use clrbind_model::ids::TypeStableId;
use clrbind_model::member::{EmitScope, EventSymbol, FieldSymbol, MethodSymbol, ParameterSymbol, PropertySymbol};
use clrbind_model::type_symbol::TypeFlags;
use clrbind_model::{SymbolGraph, TypeKind, TypeSymbol};
use indexmap::IndexMap;
use clrbind_plan::import_graph::relative_import_path;

pub struct NamespaceDeclarations {
    pub content: String,
    pub needs_support: bool,
}

pub fn render_namespace(
    graph: &SymbolGraph,
    namespace: &str,
    aliases: &IndexMap<(String, TypeStableId), String>,
) -> BuildResult<NamespaceDeclarations> {
    let mut printer = NamespacePrinter::new(graph, namespace, aliases);
    let mut body = IndentWriter::new();

    for ty in graph.types_in_namespace_emit_order(namespace) {
        render_type(&mut body, &mut printer, ty)?;
        body.write_line();
    }

    let mut out = IndentWriter::new();
    if printer.support_used {
        let depth = super::support_depth(namespace);
        let path = format!("{}_support/types", "../".repeat(depth));
        let mut names: Vec<&str> = BRANDED_NUMERICS.iter().map(|(_, alias)| *alias).collect();
        names.push(CHAR_SUPPORT_ALIAS);
        names.push("Ptr");
        names.push("ByRef");
        out.line(&format!("import {{ {} }} from \"{path}\";", names.join(", ")));
    }

    let mut import_entries: Vec<(&TypeStableId, &String)> = printer.imports_used.iter().collect();
    import_entries.sort_by(|a, b| a.1.cmp(b.1));
    for (target, local_name) in import_entries {
        let original = graph.type_by_stable_id(target).and_then(|t| t.target_emit_name.clone()).unwrap_or_else(|| local_name.clone());
        let target_namespace = target.open_generic_full_name().rsplit_once('.').map(|(ns, _)| ns.to_string()).unwrap_or_default();
        let path = relative_import_path(namespace, &target_namespace);
        if &original == local_name {
            out.line(&format!("import {{ {original} }} from \"{path}\";"));
        } else {
            out.line(&format!("import {{ {original} as {local_name} }} from \"{path}\";"));
        }
    }
    out.write_line();
    out.write(&body.finish());

    Ok(NamespaceDeclarations { content: out.finish(), needs_support: printer.support_used })
}

fn emit_name(ty: &TypeSymbol) -> &str {
    ty.target_emit_name.as_deref().unwrap_or_else(|| ty.stable_id.clr_full_name())
}

fn render_type(w: &mut IndentWriter, printer: &mut NamespacePrinter, ty: &TypeSymbol) -> BuildResult<()> {
    match ty.kind {
        TypeKind::Enum => render_enum(w, ty),
        TypeKind::Delegate => render_delegate(w, printer, ty)?,
        TypeKind::Interface => render_interface(w, printer, ty)?,
        TypeKind::StaticNamespace => render_class_like(w, printer, ty, false)?,
        TypeKind::Class | TypeKind::Struct => render_class_like(w, printer, ty, true)?,
    }
    Ok(())
}

fn render_generic_params(printer: &mut NamespacePrinter, ty: &TypeSymbol) -> BuildResult<String> {
    if ty.generic_parameters.is_empty() {
        return Ok(String::new());
    }
    let mut parts = Vec::with_capacity(ty.generic_parameters.len());
    for gp in &ty.generic_parameters {
        if gp.resolved_constraints.is_empty() {
            parts.push(gp.name.clone());
        } else {
            let joiner = match gp.merge_kind {
                Some(clrbind_model::GenericConstraintKind::Union) => " | ",
                _ => " & ",
            };
            let mut printed = Vec::with_capacity(gp.resolved_constraints.len());
            for c in &gp.resolved_constraints {
                printed.push(printer.print(c)?);
            }
            parts.push(format!("{} extends {}", gp.name, printed.join(joiner)));
        }
    }
    Ok(format!("<{}>", parts.join(", ")))
}

fn render_params(printer: &mut NamespacePrinter, params: &[ParameterSymbol]) -> BuildResult<String> {
    let mut parts = Vec::with_capacity(params.len());
    for p in params {
        parts.push(format!("{}: {}", p.name, printer.print(&p.ty)?));
    }
    Ok(parts.join(", "))
}

fn render_enum(w: &mut IndentWriter, ty: &TypeSymbol) {
    let name = emit_name(ty);
    w.line(&format!("export declare class {name} {{"));
    w.increase_indent();
    w.line("private constructor();");
    for field in &ty.members.fields {
        if field.common.emit_scope == EmitScope::Omitted {
            continue;
        }
        w.line(&format!("static readonly {}: {name};", field.common.target_emit_name.as_deref().unwrap_or(&field.common.clr_name)));
    }
    w.decrease_indent();
    w.line("}");
}

fn render_delegate(w: &mut IndentWriter, printer: &mut NamespacePrinter, ty: &TypeSymbol) -> BuildResult<()> {
    let name = emit_name(ty);
    let generics = render_generic_params(printer, ty)?;
    let invoke = ty.members.methods.iter().find(|m| m.common.clr_name == "Invoke");
    match invoke {
        Some(invoke) => {
            let params = render_params(printer, &invoke.parameters)?;
            let return_type = printer.print(&invoke.return_type)?;
            w.line(&format!("export type {name}{generics} = ({params}) => {return_type};"));
        }
        None => {
            w.line(&format!("export type {name}{generics} = unknown;"));
        }
    }
    Ok(())
}

fn render_interface(w: &mut IndentWriter, printer: &mut NamespacePrinter, ty: &TypeSymbol) -> BuildResult<()> {
    let name = emit_name(ty);
    let generics = render_generic_params(printer, ty)?;
    let mut extends = Vec::with_capacity(ty.interfaces.len());
    for iface in &ty.interfaces {
        extends.push(printer.print(iface)?);
    }
    let extends_clause = if extends.is_empty() { String::new() } else { format!(" extends {}", extends.join(", ")) };
    w.line(&format!("export interface {name}{generics}{extends_clause} {{"));
    w.increase_indent();
    render_members(w, printer, ty, false)?;
    w.decrease_indent();
    w.line("}");
    Ok(())
}

fn render_class_like(w: &mut IndentWriter, printer: &mut NamespacePrinter, ty: &TypeSymbol, has_instance_surface: bool) -> BuildResult<()> {
    let name = emit_name(ty);
    let generics = render_generic_params(printer, ty)?;
    let abstract_kw = if ty.flags.contains(TypeFlags::IS_ABSTRACT) { "abstract " } else { "" };

    let extends_clause = if has_instance_surface {
        match &ty.base_type {
            Some(base) => format!(" extends {}", printer.print(base)?),
            None => String::new(),
        }
    } else {
        String::new()
    };
    let mut implements = Vec::with_capacity(ty.interfaces.len());
    if has_instance_surface {
        for iface in &ty.interfaces {
            implements.push(printer.print(iface)?);
        }
    }
    let implements_clause = if implements.is_empty() { String::new() } else { format!(" implements {}", implements.join(", ")) };

    w.line(&format!("export declare {abstract_kw}class {name}{generics}{extends_clause}{implements_clause} {{"));
    w.increase_indent();
    render_members(w, printer, ty, true)?;
    w.decrease_indent();
    w.line("}");

    for view in &ty.explicit_views {
        if view.is_empty() {
            continue;
        }
        w.write_line();
        w.line(&format!("export interface {} {{", view.view_property_name));
        w.increase_indent();
        for method in &ty.members.methods {
            if view.contains(&method.common.stable_id) {
                render_method_line(w, printer, method, false)?;
            }
        }
        for prop in &ty.members.properties {
            if view.contains(&prop.common.stable_id) {
                render_property_line(w, printer, prop, false)?;
            }
        }
        w.decrease_indent();
        w.line("}");
        w.write_line();
        w.line(&format!("export interface {name} extends {} {{}}", view.view_property_name));
    }
    Ok(())
}

fn render_members(w: &mut IndentWriter, printer: &mut NamespacePrinter, ty: &TypeSymbol, allow_static: bool) -> BuildResult<()> {
    for ctor in &ty.members.constructors {
        if ctor.common.emit_scope != EmitScope::ClassSurface {
            continue;
        }
        let params = render_params(printer, &ctor.parameters)?;
        w.line(&format!("constructor({params});"));
    }
    for method in &ty.members.methods {
        if !matches!(method.common.emit_scope, EmitScope::ClassSurface | EmitScope::StaticSurface) {
            continue;
        }
        render_method_line(w, printer, method, allow_static && method.common.emit_scope.is_static())?;
    }
    for prop in &ty.members.properties {
        if !matches!(prop.common.emit_scope, EmitScope::ClassSurface | EmitScope::StaticSurface) {
            continue;
        }
        render_property_line(w, printer, prop, allow_static && prop.common.emit_scope.is_static())?;
    }
    for field in &ty.members.fields {
        if !matches!(field.common.emit_scope, EmitScope::ClassSurface | EmitScope::StaticSurface) {
            continue;
        }
        render_field_line(w, printer, field, allow_static && field.common.emit_scope.is_static())?;
    }
    for event in &ty.members.events {
        if !matches!(event.common.emit_scope, EmitScope::ClassSurface | EmitScope::StaticSurface) {
            continue;
        }
        render_event_line(w, printer, event, allow_static && event.common.emit_scope.is_static())?;
    }
    Ok(())
}

fn member_name(common_name: Option<&str>, fallback: &str) -> String {
    common_name.unwrap_or(fallback).to_string()
}

fn render_method_line(w: &mut IndentWriter, printer: &mut NamespacePrinter, method: &MethodSymbol, is_static: bool) -> BuildResult<()> {
    let name = member_name(method.common.target_emit_name.as_deref(), &method.common.clr_name);
    let static_kw = if is_static { "static " } else { "" };
    let params = render_params(printer, &method.parameters)?;
    let return_type = printer.print(&method.return_type)?;
    w.line(&format!("{static_kw}{name}({params}): {return_type};"));
    Ok(())
}

fn render_property_line(w: &mut IndentWriter, printer: &mut NamespacePrinter, prop: &PropertySymbol, is_static: bool) -> BuildResult<()> {
    let static_kw = if is_static { "static " } else { "" };
    if prop.is_indexer() {
        let index = &prop.index_parameters[0];
        let index_type = printer.print(&index.ty)?;
        let value_type = printer.print(&prop.property_type)?;
        w.line(&format!("{static_kw}[{}: {index_type}]: {value_type};", index.name));
        return Ok(());
    }
    let name = member_name(prop.common.target_emit_name.as_deref(), &prop.common.clr_name);
    let readonly_kw = if prop.is_readonly_surface || !prop.has_setter { "readonly " } else { "" };
    let ty = printer.print(&prop.property_type)?;
    w.line(&format!("{static_kw}{readonly_kw}{name}: {ty};"));
    Ok(())
}

fn render_field_line(w: &mut IndentWriter, printer: &mut NamespacePrinter, field: &FieldSymbol, is_static: bool) -> BuildResult<()> {
    let name = member_name(field.common.target_emit_name.as_deref(), &field.common.clr_name);
    let static_kw = if is_static { "static " } else { "" };
    let readonly_kw = if field.is_readonly { "readonly " } else { "" };
    let ty = printer.print(&field.field_type)?;
    w.line(&format!("{static_kw}{readonly_kw}{name}: {ty};"));
    Ok(())
}

fn render_event_line(w: &mut IndentWriter, printer: &mut NamespacePrinter, event: &EventSymbol, is_static: bool) -> BuildResult<()> {
    let name = member_name(event.common.target_emit_name.as_deref(), &event.common.clr_name);
    let static_kw = if is_static { "static " } else { "" };
    let ty = printer.print(&event.handler_type)?;
    w.line(&format!("{static_kw}readonly {name}: {ty};"));
    Ok(())
}
