/// Static level catalogue: the nine artworks the viewer pages through.
///
/// Levels are defined at compile time and never mutated. Image references
/// are opaque identifiers; nothing in the crate opens or inspects them.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Level {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub tip: &'static str,
    pub image: &'static str,
}

pub const LEVEL_COUNT: usize = 9;

pub static LEVELS: [Level; LEVEL_COUNT] = [
    Level {
        id: 1,
        title: "Dragón",
        description: "Una pieza que simboliza la fuerza imparable capaz de reducir todo a cenizas cuando se trata de proteger lo que amas.",
        tip: "Inspiración: La fuerza que se puede llegar a tener y hasta volver todo a cenizas por proteger lo que amas.",
        image: "/level1.jpg",
    },
    Level {
        id: 2,
        title: "Rosa con espinas",
        description: "La dualidad entre una belleza impecable y el dolor que surge cuando no se toma con cuidado.",
        tip: "Inspiración: La belleza de las cosas pero que llegan a lastimar si no se toman con cuidado.",
        image: "/level3.jpg",
    },
    Level {
        id: 3,
        title: "Gato en la luna",
        description: "Un retrato nostálgico que habla de sueños inmensos y la ilusión que provocan las cosas más pequeñas.",
        tip: "Inspiración: Los sueños y la ilusión que me dan las cosas.",
        image: "/level2.jpg",
    },
    Level {
        id: 4,
        title: "Michael Jackson",
        description: "Un homenaje al rey del pop, a sus canciones icónicas y a esa energía emblemática que merece ser estampada.",
        tip: "Inspiración: El rey del pop y sus canciones me parecen algo muy emblemático, una razón para estamparlo.",
        image: "/level4.jpg",
    },
    Level {
        id: 5,
        title: "Bailarina",
        description: "Una postal de un sueño de infancia que, aunque no se cumplió, sigue siendo un amor platónico por ese momento de la vida.",
        tip: "Inspiración: Quiero reflejar mi sueño de pequeña que lastimosamente no se cumplió pero sigue siendo un amor platónico hacia este lindo momento de mi vida.",
        image: "/level5.jpg",
    },
    Level {
        id: 6,
        title: "Colibrí alimentándose",
        description: "Celebración vibrante de la flora y fauna colombiana que despierta un agradecimiento enorme por vivir en un país tan hermoso.",
        tip: "Inspiración: La belleza de la flora y fauna colombiana que me produce un agradecimiento enorme de vivir en este hermoso país.",
        image: "/level6.jpg",
    },
    Level {
        id: 7,
        title: "Autorretrato",
        description: "Una pieza íntima en la que se plasma un instante de autoestima plena, capturado con esta técnica que realza cada detalle.",
        tip: "Inspiración: Sentí que en esa foto refleja mi autoestima y lo plasmé con esta gran técnica.",
        image: "/level7.jpg",
    },
    Level {
        id: 8,
        title: "Ave Fénix",
        description: "Retrato luminoso de la resiliencia: aunque todo parezca terminado, siempre existe una forma de levantarse una y otra vez.",
        tip: "Inspiración: La belleza de saber que por más acabado que te sientas siempre se va a encontrar la forma de levantarse de nuevo y las veces que sea.",
        image: "/level8.jpg",
    },
    Level {
        id: 9,
        title: "Alacrán y ave",
        description: "Una unión entre rudeza y delicadeza en un solo elemento que grita versatilidad y refleja la manera en que eres.",
        tip: "Inspiración: La rudeza y la delicadeza en un solo elemento que reflejan la versatilidad de como soy.",
        image: "/level9.jpg",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_ordered_from_one() {
        for (i, level) in LEVELS.iter().enumerate() {
            assert_eq!(level.id as usize, i + 1);
        }
    }

    #[test]
    fn every_level_has_copy_and_image() {
        for level in &LEVELS {
            assert!(!level.title.is_empty());
            assert!(!level.description.is_empty());
            assert!(level.tip.starts_with("Inspiración:"));
            assert!(level.image.ends_with(".jpg"));
        }
    }

    #[test]
    fn swapped_image_references_are_preserved() {
        assert_eq!(LEVELS[1].image, "/level3.jpg");
        assert_eq!(LEVELS[2].image, "/level2.jpg");
    }
}
