use super::SeedPost;
use time::macros::date;

pub static SEED: [SeedPost; 6] = [
    SeedPost {
        id: "1",
        title: "Unlocking Business Efficiency with SaaS Solutions",
        description: "Discover how modern SaaS solutions are transforming business operations and driving efficiency across industries.",
        content: "Full content here...",
        category: "Business",
        author_name: "Johnson",
        author_avatar: "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=150&h=150&fit=crop&crop=face",
        read_time: "5 min read",
        image: "https://images.unsplash.com/photo-1497366216548-37526070297c?w=800&h=600&fit=crop",
        published_at: date!(2024 - 01 - 15),
        slug: "unlocking-business-efficiency-with-saas-solutions",
    },
    SeedPost {
        id: "2",
        title: "Revolutionizing industries through SaaS implementation",
        description: "How SaaS platforms are reshaping traditional business models and creating new opportunities.",
        content: "Full content here...",
        category: "Technology",
        author_name: "Michael Chen",
        author_avatar: "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face",
        read_time: "4 min read",
        image: "https://images.unsplash.com/photo-1486406146926-c627a92ad1ab?w=800&h=600&fit=crop",
        published_at: date!(2024 - 01 - 14),
        slug: "revolutionizing-industries-through-saas-implementation",
    },
    SeedPost {
        id: "3",
        title: "Mastering UI Elements: A Practical Guide for Designers",
        description: "Essential UI design principles and practical tips for creating user-friendly interfaces.",
        content: "Full content here...",
        category: "Design",
        author_name: "Jennifer Taylor",
        author_avatar: "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=150&h=150&fit=crop&crop=face",
        read_time: "3 min read",
        image: "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=800&h=600&fit=crop",
        published_at: date!(2024 - 01 - 13),
        slug: "mastering-ui-elements-a-practical-guide-for-designers",
    },
    SeedPost {
        id: "4",
        title: "The Future of Remote Work: Tools and Strategies",
        description: "Exploring the latest tools and strategies for effective remote work collaboration.",
        content: "Full content here...",
        category: "Work",
        author_name: "David Wilson",
        author_avatar: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=150&h=150&fit=crop&crop=face",
        read_time: "6 min read",
        image: "https://images.unsplash.com/photo-1522202176988-66273c2fd55f?w=800&h=600&fit=crop",
        published_at: date!(2024 - 01 - 12),
        slug: "the-future-of-remote-work-tools-and-strategies",
    },
    SeedPost {
        id: "5",
        title: "Digital Transformation in Healthcare",
        description: "How technology is revolutionizing healthcare delivery and patient care.",
        content: "Full content here...",
        category: "Healthcare",
        author_name: "Emily Rodriguez",
        author_avatar: "https://images.unsplash.com/photo-1544005313-94ddf0286df2?w=150&h=150&fit=crop&crop=face",
        read_time: "7 min read",
        image: "https://images.unsplash.com/photo-1559757148-5c350d0d3c56?w=800&h=600&fit=crop",
        published_at: date!(2024 - 01 - 11),
        slug: "digital-transformation-in-healthcare",
    },
    SeedPost {
        id: "6",
        title: "Sustainable Technology: Green Solutions for the Future",
        description: "Exploring eco-friendly technology solutions and their impact on environmental sustainability.",
        content: "Full content here...",
        category: "Sustainability",
        author_name: "Alex Thompson",
        author_avatar: "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=150&h=150&fit=crop&crop=face",
        read_time: "5 min read",
        image: "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=800&h=600&fit=crop",
        published_at: date!(2024 - 01 - 10),
        slug: "sustainable-technology-green-solutions-for-the-future",
    },
];
