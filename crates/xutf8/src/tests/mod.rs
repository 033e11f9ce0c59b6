mod property_encode;
