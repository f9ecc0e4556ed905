use unirag::entity::EntityRegistry;

pub fn execute() {
    let registry = EntityRegistry::builtin();
    println!("{} programs (first match wins):\n", registry.len());
    for (i, entity) in registry.iter().enumerate() {
        println!(
            "{:>3}. {:<22} {:<8} {}",
            i + 1,
            entity.id,
            entity.school_id,
            entity.display_name
        );
    }
}
