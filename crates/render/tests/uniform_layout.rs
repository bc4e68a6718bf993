use std::mem::{offset_of, size_of};

use naga::{ArraySize, TypeInner};
use render::{RaymarchUniforms, UNIFORMS_WGSL};
use scene::MAX_OBJECTS;

fn parse_and_validate() -> naga::Module {
    let module = naga::front::wgsl::parse_str(UNIFORMS_WGSL).expect("wgsl parse");
    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator.validate(&module).expect("wgsl validate");
    module
}

fn uniforms_struct(module: &naga::Module) -> (Vec<naga::StructMember>, u32) {
    module
        .types
        .iter()
        .find_map(|(_, ty)| match (&ty.name, &ty.inner) {
            (Some(name), TypeInner::Struct { members, span }) if name == "RaymarchUniforms" => {
                Some((members.clone(), *span))
            }
            _ => None,
        })
        .expect("RaymarchUniforms struct")
}

fn member_offset(members: &[naga::StructMember], name: &str) -> usize {
    members
        .iter()
        .find(|m| m.name.as_deref() == Some(name))
        .map(|m| m.offset as usize)
        .unwrap_or_else(|| panic!("member {name} missing"))
}

#[test]
fn wgsl_block_compiles() {
    parse_and_validate();
}

#[test]
fn struct_span_matches_rust_block() {
    let module = parse_and_validate();
    let (_, span) = uniforms_struct(&module);
    assert_eq!(span as usize, size_of::<RaymarchUniforms>());
}

#[test]
fn member_offsets_match_rust_block() {
    let module = parse_and_validate();
    let (members, _) = uniforms_struct(&module);

    let expected = [
        ("resolution", offset_of!(RaymarchUniforms, resolution)),
        ("elapsed_time", offset_of!(RaymarchUniforms, elapsed_time)),
        ("cam_pos", offset_of!(RaymarchUniforms, cam_pos)),
        ("fov", offset_of!(RaymarchUniforms, fov)),
        ("cam_forward", offset_of!(RaymarchUniforms, cam_forward)),
        ("obj_count", offset_of!(RaymarchUniforms, obj_count)),
        ("cam_right", offset_of!(RaymarchUniforms, cam_right)),
        ("cam_up", offset_of!(RaymarchUniforms, cam_up)),
        ("sun_dir", offset_of!(RaymarchUniforms, sun_dir)),
        ("sun_color", offset_of!(RaymarchUniforms, sun_color)),
        ("obj_pos", offset_of!(RaymarchUniforms, obj_pos)),
        ("obj_color", offset_of!(RaymarchUniforms, obj_color)),
        ("obj_reflect", offset_of!(RaymarchUniforms, obj_reflect)),
        ("obj_type", offset_of!(RaymarchUniforms, obj_type)),
        ("sphere_radii", offset_of!(RaymarchUniforms, sphere_radii)),
        ("box_sizes", offset_of!(RaymarchUniforms, box_sizes)),
        ("torus_radii", offset_of!(RaymarchUniforms, torus_radii)),
        ("obj_inv_rot", offset_of!(RaymarchUniforms, obj_inv_rot)),
    ];
    assert_eq!(members.len(), expected.len());
    for (name, offset) in expected {
        assert_eq!(member_offset(&members, name), offset, "offset of {name}");
    }
}

#[test]
fn every_array_holds_max_objects() {
    let module = parse_and_validate();
    let (members, _) = uniforms_struct(&module);

    let mut arrays = 0;
    for member in &members {
        if let TypeInner::Array { size, .. } = module.types[member.ty].inner {
            match size {
                ArraySize::Constant(n) => assert_eq!(n.get() as usize, MAX_OBJECTS),
                ArraySize::Dynamic => panic!("{:?} is runtime sized", member.name),
            }
            arrays += 1;
        }
    }
    assert_eq!(arrays, 8);
}
