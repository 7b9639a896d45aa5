//! Type extraction (spec.md §4.1): turns loaded `RawAssembly` metadata
//! into `TypeSymbol`s in a fresh `SymbolGraph`.

use crate::closure::resolve_transitive_closure;
use crate::metadata::{MetadataSource, RawAssembly, RawMember, RawMemberKind, RawType, RawTypeKind};
use crate::type_ref_factory::TypeRefFactory;
use clrbind_common::diagnostics::{codes, DiagnosticBag};
use clrbind_common::error::BuildResult;
use rayon::prelude::*;
use clrbind_model::generics::GenericParameterSymbol;
use clrbind_model::ids::{MemberStableId, TypeStableId};
use clrbind_model::member::{
    ConstructorSymbol, EventSymbol, FieldSymbol, MemberCommon, MethodSymbol, ParameterModifier,
    ParameterSymbol, PropertySymbol,
};
use clrbind_model::signature::CanonicalSignature;
use clrbind_model::type_ref::TypeRef;
use clrbind_model::type_symbol::{TypeFlags, TypeKind, TypeSymbol};
use clrbind_model::SymbolGraph;
use std::collections::HashSet;

pub struct LoadResult {
    pub graph: SymbolGraph,
    pub source_assembly_names: Vec<String>,
    pub unresolved_references: HashSet<String>,
}

/// Whether a simple name marks a compiler-generated type (spec.md §4.1:
/// "recognised by the presence of `<` or `>`").
fn is_compiler_generated(simple_name: &str) -> bool {
    simple_name.contains('<') || simple_name.contains('>')
}

fn raw_kind_to_type_kind(kind: RawTypeKind) -> TypeKind {
    match kind {
        RawTypeKind::Class => TypeKind::Class,
        RawTypeKind::Struct => TypeKind::Struct,
        RawTypeKind::Interface => TypeKind::Interface,
        RawTypeKind::Enum => TypeKind::Enum,
        RawTypeKind::Delegate => TypeKind::Delegate,
    }
}

fn parse_type_ref(factory: &mut TypeRefFactory, clr_name: &str) -> TypeRef {
    let (namespace, simple) = match clr_name.rsplit_once('.') {
        Some((ns, name)) => (ns, name),
        None => ("", clr_name),
    };
    if let Some((base, arity_str)) = simple.split_once('`') {
        let arity: u8 = arity_str.parse().unwrap_or(0);
        factory.make_named(namespace, base, arity, Vec::new())
    } else {
        factory.make_named(namespace, simple, 0, Vec::new())
    }
}

fn build_member_common(
    declaring: &str,
    assembly: &str,
    member_name: &str,
    signature: &CanonicalSignature,
    metadata_token: u32,
) -> MemberCommon {
    let stable_id = MemberStableId::new(assembly, declaring, member_name, signature);
    let mut common = MemberCommon::new(stable_id, member_name);
    common.metadata_token = metadata_token;
    common
}

fn extract_members(
    factory: &mut TypeRefFactory,
    declaring_clr_full_name: &str,
    assembly: &str,
    raw_members: &[RawMember],
    diagnostics: &mut DiagnosticBag,
) -> clrbind_model::member::MemberBundle {
    let mut bundle = clrbind_model::member::MemberBundle::default();
    let mut seen_ids = HashSet::new();

    for raw in raw_members {
        if !raw.is_public {
            continue;
        }
        let params: Vec<(TypeRef, clrbind_model::signature::ParamModifierTag)> = raw
            .parameter_types
            .iter()
            .map(|p| (parse_type_ref(factory, p), clrbind_model::signature::ParamModifierTag::None))
            .collect();
        let return_type = parse_type_ref(factory, &raw.return_type);

        match raw.kind {
            RawMemberKind::Method => {
                let signature = CanonicalSignature::for_method(&params, &return_type);
                let common = build_member_common(declaring_clr_full_name, assembly, &raw.name, &signature, raw.metadata_token);
                if !seen_ids.insert(common.stable_id.clone()) {
                    diagnostics.error(
                        codes::LOAD_006_DUPLICATE_MEMBER,
                        format!("duplicate member id {} on {declaring_clr_full_name}", common.stable_id),
                    );
                    continue;
                }
                bundle.methods.push(MethodSymbol {
                    common,
                    generic_parameters: Vec::new(),
                    parameters: raw
                        .parameter_types
                        .iter()
                        .enumerate()
                        .map(|(i, p)| ParameterSymbol {
                            name: format!("arg{i}"),
                            ty: parse_type_ref(factory, p),
                            modifier: ParameterModifier::None,
                            has_default: false,
                        })
                        .collect(),
                    return_type,
                    is_static: raw.is_static,
                    is_abstract: false,
                    is_virtual: false,
                    signature,
                });
            }
            RawMemberKind::Property => {
                let signature = CanonicalSignature::for_property(
                    &params.iter().map(|(t, _)| t.clone()).collect::<Vec<_>>(),
                    &return_type,
                );
                let common = build_member_common(declaring_clr_full_name, assembly, &raw.name, &signature, raw.metadata_token);
                if !seen_ids.insert(common.stable_id.clone()) {
                    diagnostics.error(
                        codes::LOAD_006_DUPLICATE_MEMBER,
                        format!("duplicate member id {} on {declaring_clr_full_name}", common.stable_id),
                    );
                    continue;
                }
                bundle.properties.push(PropertySymbol {
                    common,
                    index_parameters: raw
                        .parameter_types
                        .iter()
                        .enumerate()
                        .map(|(i, p)| ParameterSymbol {
                            name: format!("index{i}"),
                            ty: parse_type_ref(factory, p),
                            modifier: ParameterModifier::None,
                            has_default: false,
                        })
                        .collect(),
                    property_type: return_type,
                    is_static: raw.is_static,
                    has_getter: true,
                    has_setter: true,
                    is_readonly_surface: false,
                    signature,
                });
            }
            RawMemberKind::Field => {
                let signature = CanonicalSignature::for_field_or_event(&return_type);
                let common = build_member_common(declaring_clr_full_name, assembly, &raw.name, &signature, raw.metadata_token);
                if !seen_ids.insert(common.stable_id.clone()) {
                    diagnostics.error(
                        codes::LOAD_006_DUPLICATE_MEMBER,
                        format!("duplicate member id {} on {declaring_clr_full_name}", common.stable_id),
                    );
                    continue;
                }
                bundle.fields.push(FieldSymbol {
                    common,
                    field_type: return_type,
                    is_static: raw.is_static,
                    is_readonly: false,
                    signature,
                });
            }
            RawMemberKind::Event => {
                let signature = CanonicalSignature::for_field_or_event(&return_type);
                let common = build_member_common(declaring_clr_full_name, assembly, &raw.name, &signature, raw.metadata_token);
                if !seen_ids.insert(common.stable_id.clone()) {
                    diagnostics.error(
                        codes::LOAD_006_DUPLICATE_MEMBER,
                        format!("duplicate member id {} on {declaring_clr_full_name}", common.stable_id),
                    );
                    continue;
                }
                bundle.events.push(EventSymbol {
                    common,
                    handler_type: return_type,
                    is_static: raw.is_static,
                    signature,
                });
            }
            RawMemberKind::Constructor => {
                let signature = CanonicalSignature::for_method(&params, &TypeRef::named_simple("System.Void"));
                let common = build_member_common(declaring_clr_full_name, assembly, ".ctor", &signature, raw.metadata_token);
                if !seen_ids.insert(common.stable_id.clone()) {
                    diagnostics.error(
                        codes::LOAD_006_DUPLICATE_MEMBER,
                        format!("duplicate member id {} on {declaring_clr_full_name}", common.stable_id),
                    );
                    continue;
                }
                bundle.constructors.push(ConstructorSymbol {
                    common,
                    parameters: raw
                        .parameter_types
                        .iter()
                        .enumerate()
                        .map(|(i, p)| ParameterSymbol {
                            name: format!("arg{i}"),
                            ty: parse_type_ref(factory, p),
                            modifier: ParameterModifier::None,
                            has_default: false,
                        })
                        .collect(),
                    signature,
                });
            }
        }
    }

    bundle
}

/// One assembly's worth of extraction, run independently of every other
/// assembly so [`load_graph`] can fan this out over `rayon`: each call
/// only touches its own `RawAssembly` and writes into a private `Vec` and
/// a private `DiagnosticBag`, never the shared graph, so completion order
/// cannot affect the result.
fn extract_assembly(assembly: &RawAssembly) -> (Vec<(String, TypeSymbol)>, DiagnosticBag) {
    let mut factory = TypeRefFactory::new(&assembly.key.name);
    let mut diagnostics = DiagnosticBag::new();
    let mut extracted = Vec::new();

    let mut sorted_types: Vec<&RawType> = assembly.types.iter().collect();
    sorted_types.sort_by(|a, b| a.clr_full_name.cmp(&b.clr_full_name));

    for raw_type in sorted_types {
        if !raw_type.is_public {
            continue;
        }
        if is_compiler_generated(&raw_type.simple_name) {
            continue;
        }

        let stable_id = TypeStableId::new(&assembly.key.name, &raw_type.clr_full_name);
        let mut symbol = TypeSymbol::new(stable_id, raw_kind_to_type_kind(raw_type.kind));
        symbol.metadata_token = raw_type.metadata_token;

        symbol.generic_parameters = raw_type
            .generic_parameter_names
            .iter()
            .enumerate()
            .map(|(i, name)| GenericParameterSymbol::new(name.clone(), i as u8))
            .collect();

        symbol.base_type = raw_type.base_type.as_deref().map(|b| parse_type_ref(&mut factory, b));
        symbol.interfaces = raw_type.interfaces.iter().map(|i| parse_type_ref(&mut factory, i)).collect();

        let mut flags = TypeFlags::empty();
        if raw_type.is_abstract {
            flags |= TypeFlags::IS_ABSTRACT;
        }
        if raw_type.is_sealed {
            flags |= TypeFlags::IS_SEALED;
        }
        if raw_type.is_value_type {
            flags |= TypeFlags::IS_VALUE_TYPE;
        }
        if raw_type.is_static {
            flags |= TypeFlags::IS_STATIC;
        }
        symbol.flags = flags;

        symbol.members = extract_members(
            &mut factory,
            &raw_type.clr_full_name,
            &assembly.key.name,
            &raw_type.members,
            &mut diagnostics,
        );

        extracted.push((raw_type.namespace.clone(), symbol));
    }

    (extracted, diagnostics)
}

/// Orchestrates the full Load phase: transitive closure, then
/// deterministic (sorted-by-assembly-name) type extraction.
///
/// Extraction itself runs one `rayon` task per assembly (SPEC_FULL.md §4,
/// "rayon is retained... for exactly one opportunity that doesn't threaten
/// determinism"); only the merge back into the shared graph is sequential,
/// walked in the same assembly-name order regardless of which task
/// finished first.
pub fn load_graph(
    source: &dyn MetadataSource,
    seed_paths: &[String],
    strict_versions: bool,
    diagnostics: &mut DiagnosticBag,
) -> BuildResult<LoadResult> {
    let closure = resolve_transitive_closure(source, seed_paths, strict_versions, diagnostics)?;

    let mut assemblies: Vec<_> = closure
        .ordered_paths
        .iter()
        .filter_map(|p| source.load_assembly(p))
        .collect();
    assemblies.sort_by(|a, b| a.key.name.cmp(&b.key.name));

    let per_assembly: Vec<_> = assemblies.par_iter().map(extract_assembly).collect();

    let mut graph = SymbolGraph::new();
    let mut source_names = Vec::new();

    for (assembly, (extracted, local_diagnostics)) in assemblies.iter().zip(per_assembly) {
        source_names.push(assembly.key.name.clone());
        diagnostics.extend(local_diagnostics);
        for (namespace, symbol) in extracted {
            if let Err(msg) = graph.insert_type(&namespace, symbol) {
                diagnostics.error(codes::INT_001_DUPLICATE_STABLE_ID, msg);
            }
        }
    }

    Ok(LoadResult {
        graph,
        source_assembly_names: source_names,
        unresolved_references: closure.unresolved,
    })
}
