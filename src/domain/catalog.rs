//! Bundled site data: the owner's profile and the static project catalog
//! served whenever the hosted service cannot supply live rows.

use once_cell::sync::Lazy;

use crate::entities::{
    profile::{Experience, Profile, Skill},
    project::Project,
};

pub static PROFILE: Profile = Profile {
    name: "Jeremiah Egemonye",
    role: "Frontend and Mobile Developer",
    bio: "I build accessible, pixel-perfect, and performant web experiences.",
    email: "jeremiah@example.com",
    github: "https://github.com/ttjerry",
    linkedin: "https://linkedin.com",
    avatar: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?fit=crop&w=800&q=80",
};

pub static SKILLS: [Skill; 10] = [
    Skill { name: "React", icon: "react", color: "#61DAFB" },
    Skill { name: "React Native", icon: "react", color: "#61DAFB" },
    Skill { name: "Next.js", icon: "nextdotjs", color: "#FFFFFF" },
    Skill { name: "TypeScript", icon: "typescript", color: "#3178C6" },
    Skill { name: "Tailwind CSS", icon: "tailwindcss", color: "#06B6D4" },
    Skill { name: "Node.js", icon: "nodedotjs", color: "#339933" },
    Skill { name: "PostgreSQL", icon: "postgresql", color: "#4169E1" },
    Skill { name: "GraphQL", icon: "graphql", color: "#E10098" },
    Skill { name: "Framer Motion", icon: "framer", color: "#0055FF" },
    Skill { name: "GSAP", icon: "greensock", color: "#88CE02" },
];

pub static EXPERIENCES: [Experience; 2] = [
    Experience {
        id: "1",
        role: "Senior Frontend Engineer",
        company: "Tech Corp",
        period: "2022 - Present",
        description: "Leading the frontend team in building a scalable SaaS platform using Next.js and TypeScript. Improved performance by 40%.",
    },
    Experience {
        id: "2",
        role: "Frontend and Mobile Developer",
        company: "Creative Agency",
        period: "2020 - 2022",
        description: "Developed custom e-commerce solutions for various clients. Integrated Stripe and headless CMS solutions.",
    },
];

/// Fallback projects, in display order. Built on first use only.
pub static PROJECTS: Lazy<Vec<Project>> = Lazy::new(|| {
    vec![
        catalog_entry(
            "1",
            "E-Commerce Dashboard",
            "ecommerce-dashboard",
            "A comprehensive analytics dashboard for online retailers, featuring real-time data visualization and inventory management.",
            &["Next.js", "TypeScript", "Tailwind CSS", "Recharts"],
            "https://images.unsplash.com/photo-1551288049-bebda4e38f71?auto=format&fit=crop&w=800&q=80",
            true,
        ),
        catalog_entry(
            "2",
            "Task Management App",
            "task-manager",
            "A collaborative task management tool with drag-and-drop functionality and real-time updates.",
            &["React", "Firebase", "Framer Motion", "Styled Components"],
            "https://images.unsplash.com/photo-1540350394557-8d14678e7f91?auto=format&fit=crop&w=800&q=80",
            true,
        ),
        catalog_entry(
            "3",
            "AI Content Generator",
            "ai-content-gen",
            "An application that uses OpenAI's API to help writers generate blog post ideas and outlines.",
            &["Next.js", "OpenAI API", "Tailwind CSS"],
            "https://images.unsplash.com/photo-1677442136019-21780ecad995?auto=format&fit=crop&w=800&q=80",
            false,
        ),
    ]
});

pub fn fallback_projects() -> Vec<Project> {
    PROJECTS.clone()
}

pub fn find_fallback_by_slug(slug: &str) -> Option<Project> {
    PROJECTS.iter().find(|p| p.slug == slug).cloned()
}

fn catalog_entry(
    id: &str,
    title: &str,
    slug: &str,
    description: &str,
    technologies: &[&str],
    image_url: &str,
    featured: bool,
) -> Project {
    Project {
        id: id.to_string(),
        title: title.to_string(),
        slug: slug.to_string(),
        description: description.to_string(),
        content: None,
        technologies: technologies.iter().map(|t| t.to_string()).collect(),
        image_url: Some(image_url.to_string()),
        live_url: Some("https://example.com".to_string()),
        github_url: Some("https://github.com".to_string()),
        featured,
        created_at: None,
    }
}
