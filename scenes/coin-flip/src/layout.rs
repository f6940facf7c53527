//! Initial placement of the cube, the coin and the result display

use scenekit::{
    EntityKind, MeshResource, ModelEntity, SceneHost, SimpleMaterial, TextEntity, Transform, VolumeId,
};

pub const CUBE_ID: &str = "cube";
pub const COIN_ID: &str = "coin";
pub const DISPLAY_ID: &str = "display";

/// Ids of what [`build`] placed, plus the coin's starting transform.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    pub cube: VolumeId,
    pub coin: VolumeId,
    pub display: VolumeId,
    pub coin_home: Transform,
}

impl SceneLayout {
    /// Top-level entities, in creation order.
    pub fn roots(&self) -> [&str; 3] {
        [&self.cube, &self.coin, &self.display]
    }
}

fn cube() -> ModelEntity {
    ModelEntity::with_id(CUBE_ID, MeshResource::generate_box(1.0), SimpleMaterial::new()).position(8.0, 1.0, 8.0)
}

/// A flat yellow disc with a letter on each face.
fn coin() -> ModelEntity {
    let material = SimpleMaterial::new().color(1.0, 1.0, 0.0).metallic(0.9).roughness(0.1);
    let mut coin = ModelEntity::with_id(COIN_ID, MeshResource::generate_cylinder(1.0, 1.0), material)
        .position(8.0, 1.6, 8.0)
        .scale_xyz(0.1, 0.01, 0.1);

    // Offsets are in the coin's local space, just past each face
    coin.add_child(
        TextEntity::with_id("coin-head", "N")
            .color(1.0, 0.0, 0.0)
            .position(0.0, 0.6, 0.0)
            .euler_degrees(90.0, 0.0, 0.0)
            .scale(0.05),
    );
    coin.add_child(
        TextEntity::with_id("coin-tail", "A")
            .color(0.0, 0.0, 1.0)
            .position(0.0, -0.6, 0.0)
            .euler_degrees(90.0, 180.0, 0.0)
            .scale(0.05),
    );
    coin
}

fn display() -> TextEntity {
    TextEntity::with_id(DISPLAY_ID, "0").color(1.0, 1.0, 1.0).position(8.0, 3.0, 8.0)
}

/// Place everything through `host`.
pub fn build<H: SceneHost>(host: &mut H) -> SceneLayout {
    let coin = coin();
    let coin_home = *coin.transform();

    let cube = host.add_entity(cube().into());
    let coin = host.add_entity(EntityKind::from(coin));
    let display = host.add_entity(display().into());

    SceneLayout { cube, coin, display, coin_home }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenekit::{Command, CommandHost, SceneCommand, VolumeSource};

    fn created(commands: &[Command]) -> Vec<(String, Option<String>, VolumeSource)> {
        commands
            .iter()
            .filter_map(|c| match c {
                Command::Scene(SceneCommand::CreateVolume(data)) => {
                    Some((data.volume_id.clone(), data.parent.clone(), data.source.clone()))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_layout_creates_cube_coin_engravings_and_display() {
        let mut host = CommandHost::new();
        let layout = build(&mut host);

        assert_eq!(layout.roots(), ["cube", "coin", "display"]);

        let created = created(host.pending());
        let ids: Vec<_> = created.iter().map(|(id, parent, _)| (id.as_str(), parent.as_deref())).collect();
        assert_eq!(
            ids,
            vec![
                ("cube", None),
                ("coin", None),
                ("coin-head", Some("coin")),
                ("coin-tail", Some("coin")),
                ("display", None),
            ]
        );

        match &created[4].2 {
            VolumeSource::Text(text) => assert_eq!(text.value, "0"),
            other => panic!("display should be text, got {:?}", other),
        }
    }

    #[test]
    fn test_coin_home_matches_created_transform() {
        let mut host = CommandHost::new();
        let layout = build(&mut host);

        let coin = host
            .pending()
            .iter()
            .find_map(|c| match c {
                Command::Scene(SceneCommand::CreateVolume(data)) if data.volume_id == "coin" => Some(data.clone()),
                _ => None,
            })
            .unwrap();

        assert_eq!(coin.transform, layout.coin_home);
        assert_eq!(coin.transform.position, [8.0, 1.6, 8.0]);
        assert_eq!(coin.transform.scale, [0.1, 0.01, 0.1]);
        let material = coin.material.unwrap();
        assert_eq!(material.metallic, Some(0.9));
        assert_eq!(material.roughness, Some(0.1));
    }
}
